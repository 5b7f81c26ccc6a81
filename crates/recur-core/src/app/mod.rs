//! App - アプリケーション層
//!
//! このモジュールは、エンジンと ports を組み合わせてタスクのライフサイクルを実装します。
//!
//! # 主要コンポーネント
//! - **Scheduler**: 作成・更新時の期日の正規化、完了時の繰り越し、アジェンダ（検索・ページング）
//! - **SchedulerConfig**: ルール長の上限とページサイズ
//! - **NextDateQuery**: `now` / `date` / `repeat` クエリの検証とエラーの 400 応答への変換

pub mod config;
pub mod next_date;
pub mod scheduler;

// 主要な型を再エクスポート
pub use self::config::SchedulerConfig;
pub use self::next_date::{BAD_REQUEST, NextDateQuery, Rejection};
pub use self::scheduler::{AgendaQuery, Completion, Scheduler, SchedulerError, resolve_due_date};
