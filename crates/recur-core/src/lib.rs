//! recur-core
//!
//! Date engine for recurring tasks: given an anchor date, a reference "now"
//! and a compact repetition rule (`y`, `d 3`, `w 1,3`, `m -1 6,12`), compute
//! the next due date strictly after "now".
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（CalendarDate, RecurrenceRule, errors, task）
//! - **engine**: 純粋関数としての評価器（yearly / daily / weekly / monthly）
//! - **ports**: 抽象化レイヤー（TaskStore, Clock）
//! - **impls**: 実装（InMemoryTaskStore など開発用）
//! - **app**: アプリケーションロジック（Scheduler, NextDateQuery）

pub mod app;
pub mod domain;
pub mod engine;
pub mod impls;
pub mod ports;

pub use domain::{CalendarDate, ErrorKind, RecurrenceError, RecurrenceRule};
pub use engine::next_occurrence;
