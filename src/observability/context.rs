//! Thread-local context tracking for crash reports.
//!
//! Records which pipeline stage is running and which file is being read, so a
//! panic can say where it happened. Guards restore the previous context on drop.

use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RunContext> = const { RefCell::new(RunContext::new()) };
}

/// What firmrank was doing at a given moment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunContext {
    pub phase: Option<Phase>,
    pub current_file: Option<PathBuf>,
}

impl RunContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_file: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Reading configuration files
    ConfigLoading,
    /// Reading the snapshot document
    SnapshotLoading,
    /// Finding and parsing `source_*.json` files
    SourceDiscovery,
    /// Merging firms and deduplicating reviews
    Merging,
    /// Computing coverage, rankings and themes for a snapshot
    Analysis,
    /// Running review filters and firm ranking
    Filtering,
    /// Writing reports
    OutputGeneration,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfigLoading => write!(f, "config_loading"),
            Self::SnapshotLoading => write!(f, "snapshot_loading"),
            Self::SourceDiscovery => write!(f, "source_discovery"),
            Self::Merging => write!(f, "merging"),
            Self::Analysis => write!(f, "analysis"),
            Self::Filtering => write!(f, "filtering"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// Restores the previous context when dropped.
pub struct ContextGuard {
    previous: RunContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Enter a phase until the returned guard drops.
#[must_use]
pub fn set_phase(phase: Phase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

#[must_use]
pub fn set_current_file(path: impl Into<PathBuf>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_file = Some(path.into());
        ContextGuard { previous }
    })
}

#[must_use]
pub fn get_current_context() -> RunContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = RunContext::new();
    });
}
