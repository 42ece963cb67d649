//! Kite Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Kite
//! scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             kite-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │    (ModuleService, ProjectService)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │     (Driven: Filesystem, Templates)     │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kite-adapters (Infrastructure)      │
//! │ (LocalFilesystem, BuiltinTemplates, …)  │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ModuleKind, ProjectConfig, naming, …)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kite_core::prelude::*;
//!
//! let service = ModuleService::new(filesystem, templates);
//! let request = ModuleRequest::new("user-profile", ModuleKind::Model);
//! let generated = service.generate(&request, &config, &GenerateOptions::default())?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GeneratedModule, InitOptions, InitReport, ModuleService, ProjectService,
        ports::{Filesystem, TemplateProvider},
    };
    pub use crate::domain::{
        KindConfig, ModuleKind, ModuleOutcome, ModuleRequest, NameGrammar, ProjectConfig,
        ProjectFile, RenderContext, ResolvedModule,
    };
    pub use crate::error::{KiteError, KiteResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
