// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: no model math, no printing,
// no direct file access.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// One comparison: generate, split, train both models, persist
pub mod compare_use_case;

// The comparison repeated over named hyperparameter presets
pub mod sweep_use_case;

// Reload trained models and score sequence pairs
pub mod similarity_use_case;
