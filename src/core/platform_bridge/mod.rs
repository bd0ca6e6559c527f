//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform layer (winit/rodio/etc.) with core systems.
//
// This module defines the contract between platform implementations and
// core logic, enabling platform backends to be swapped without changing
// core code.
//
// Components:
// - `interface`: Display and Audio collaborator traits (the contract)
// - `event_collector`: Event queue between a backend and the frame loop
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod event_collector;
pub mod interface;

//=== Public API ==========================================================

pub use interface::{Audio, Display};

//=== Internal API ========================================================

pub(crate) use event_collector::{EventQueue, EventSender};
