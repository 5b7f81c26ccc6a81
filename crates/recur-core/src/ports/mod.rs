//! Ports - 抽象化レイヤー
//!
//! このモジュールは Hexagonal Architecture の「ポート」を定義します。
//! エンジン自体はどのポートにも依存しません（純粋関数）。
//! ポートを使うのは app 層（Scheduler）だけです。

pub mod clock;
pub mod task_store;

// 主要な trait を再エクスポート
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::task_store::{StoreError, TaskFilter, TaskStore};
