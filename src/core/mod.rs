pub mod config;

pub mod encoder;

pub mod item;

pub mod name;

pub mod row;

pub mod step;
