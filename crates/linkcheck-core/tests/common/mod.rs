#![allow(dead_code)]

pub mod host_server;
