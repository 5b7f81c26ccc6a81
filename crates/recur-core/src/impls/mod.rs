//! Impls - ポートの実装
//!
//! - **InMemoryTaskStore**: 開発・テスト・CLI 用のストア（永続化なし）

pub mod inmem_store;

pub use self::inmem_store::InMemoryTaskStore;
