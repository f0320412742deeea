//! FaceTest API: playful AI face analysis of uploaded selfies.
//!
//! Two tests are offered, "which animal do you look like" and "how old do
//! you look". The actual judgement is made by an external multimodal model;
//! this crate validates uploads, prompts the model, interprets its reply and
//! always answers with something presentable.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod handlers;
pub mod intake;
pub mod prompts;
pub mod services;
pub mod startup;
