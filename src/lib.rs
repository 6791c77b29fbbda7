// error_chain macro can recurse deeply
#![recursion_limit = "1024"]

#[macro_use]
extern crate error_chain;
#[macro_use(lazy_static)]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod aggregate;
pub mod args;
pub mod background;
pub mod commands;
pub mod common;
pub mod constants;
pub mod errors;
pub mod oligo;
pub mod progress;
pub mod reads;
pub mod reference;
pub mod scan;
pub mod table;
