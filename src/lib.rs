pub mod atom;
pub mod availability;
pub mod boundary;
pub mod config;
pub mod exchange;
pub mod fetch;
pub mod headers;
pub mod output;
pub mod pipeline;
pub mod sheet;
pub mod sources;
pub mod viewer;
