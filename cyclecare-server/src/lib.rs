//! Bicycle repair station finder server.
//!
//! A web application that answers: "where is the nearest public bicycle
//! repair station I can actually ride to from here?"

pub mod domain;
pub mod dropoffs;
pub mod finder;
pub mod matrix;
pub mod web;
