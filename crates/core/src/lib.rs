//! Linkbio Core - Shared types library.
//!
//! This crate provides the types and pure logic used across all linkbio components:
//! - `site` - Public landing page
//! - `admin` - Password-gated content editor and analytics dashboard
//! - `cli` - Command-line tools for migrations and admin users
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP. Both binaries render and mutate the same [`StoreData`], so
//! merging, link resolution, aggregation and playback rules live here.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs and usernames
//! - [`store`] - Page content, defaults and partial updates
//! - [`links`] - Action destination resolution (WhatsApp deep-links)
//! - [`analytics`] - Event payloads and click aggregation
//! - [`video`] - Background media selection and playback state machine
//! - [`media`] - Upload rules for logo and background files

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod analytics;
pub mod links;
pub mod media;
pub mod store;
pub mod types;
pub mod video;

pub use analytics::{AnalyticsSummary, ButtonClick, ButtonStat, EventType, PageView, RecentActivity};
pub use links::resolve_action_href;
pub use media::{MediaField, MediaKind, MediaRuleError};
pub use store::{
    Action, ActionField, ActionGroup, ActionIcon, BUILTIN_VIDEO_SENTINEL, SocialLinks, StoreData,
    StorePatch,
};
pub use video::{BackgroundMedia, PlaybackPolicy};
pub use types::*;
