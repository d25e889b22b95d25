//! Visiting-order optimizer server.
//!
//! Answers: "starting here, in which order should I visit these five
//! places to spend the least time travelling?" Travel times mix walking,
//! an external trip planner and a rail graph built from the static feed.

pub mod cache;
pub mod config;
pub mod domain;
pub mod feed;
pub mod geocode;
pub mod otp;
pub mod planner;
pub mod rail;
pub mod web;
