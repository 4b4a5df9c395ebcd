//! # civic-core
//!
//! Core types and traits for the CivicWatch bot: [`Bot`], [`Handler`], message and user types,
//! error types and tracing initialization. Transport-agnostic; used by civic-telegram,
//! handler-chain and civic-bot.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::{Bot, ReplyKeyboard};
pub use error::{CivicError, HandlerError, Result};
pub use logger::init_tracing;
pub use types::{
    Chat, Handler, HandlerResponse, Message, MessageContent, ToCoreMessage, ToCoreUser, User,
};
