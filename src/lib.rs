//! Gym Portal - membership, billing and store backend for a gym.
//!
//! Clients sign up and pay for memberships through Paystack, admins manage
//! the member roster and the store catalogue, and both payment flows settle
//! either by explicit verification or by signed gateway webhook.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
