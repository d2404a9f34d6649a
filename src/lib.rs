//! Broken-mirror and text-reveal presentation effects for the browser.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It
//! implements two independent cosmetic effects: a "broken mirror" image
//! shatter (the target image is tessellated into polygon shards that tumble
//! away under gravity, revealing a replacement image) and a pair of text
//! reveals (typewriter and fade-in) driven by scroll or click triggers.
//!
//! All geometry, kinematics, animation stepping, trigger logic, and text
//! scheduling is pure Rust with an explicit random source, so it can be
//! tested on the host without a browser. The [`dom`] module is the only code
//! that touches `web_sys`; it wires events, builds the transient elements,
//! and drives the `requestAnimationFrame` loop.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`geom`] | Randomized radial tessellation of a rectangle into polygon rings |
//! | [`kinetics`] | Per-shard motion state: velocity, spin, tumble axis, start delay |
//! | [`anim`] | Frame-stepped animation state machine and completion predicate |
//! | [`trigger`] | Scroll-visibility band and re-arm decisions |
//! | [`text`] | Typewriter character cues and group delay chaining |
//! | [`session`] | Per-target session registry and the completion handle |
//! | [`config`] | Effect options, defaults, and validation |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric constants (reference canvas, visibility band, etc.) |
//! | [`dom`] | web-sys shell: elements, styles, listeners, rAF loop |

pub mod anim;
pub mod config;
pub mod consts;
pub mod dom;
pub mod error;
pub mod geom;
pub mod kinetics;
pub mod session;
pub mod text;
pub mod trigger;
