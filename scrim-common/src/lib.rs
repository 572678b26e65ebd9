// `error_chain!` can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate derive_new;

#[macro_use]
extern crate log;

extern crate chrono;
extern crate mongodb;
extern crate rand;
extern crate serde;
extern crate serde_json;

pub mod model;
pub mod balance;
pub mod stats;
pub mod api;

/*
    Single error_chain shared by the whole lib (and the service crates) so `?` moves
    everything around without per-module error types.

    Add `use ::errors::*;` in a sub-module to get at it.

    A stricter setup would use `links` per concern instead of one pile of
    `foreign_links`, but one chain is way easier to live with at this size.
*/
pub mod errors {
    // Create the Error, ErrorKind, ResultExt, and Result types
     error_chain!{
        foreign_links {
            Io(::std::io::Error);
            Utf8(::std::string::FromUtf8Error);
            MongoDb(::mongodb::error::Error);
            ToBson(::mongodb::bson::ser::Error);
            FromBson(::mongodb::bson::de::Error);
            Json(::serde_json::Error);
            ParseInt(::std::num::ParseIntError);
            ParseFloat(::std::num::ParseFloatError);
        }
    }
}
