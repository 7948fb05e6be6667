//! Chat persona
//!
//! The fixed system prompt, its brand and preset additions, and quote extraction for replies.

mod prompt;
mod quote;

pub use prompt::{
    BRAND_BOOSTER, BRAND_KEYWORDS, BrandTrigger, PRESET_QUESTIONS, PresetQuestion, SYSTEM_PROMPT,
    build_system_prompt, detect_brand_trigger, find_preset, preset_context,
};
pub use quote::{Quote, extract_quote};
