//! Composite ordering key, partitioner and comparators for tsfold.
//!
//! - [`GroupIdentity`] - Exchange, symbol and period bucket of a record
//! - [`OrderingKey`] - Group identity plus the secondary sort value
//! - [`partition`] - Shard assignment from the group identity only
//! - [`GroupComparator`] - Delimits reduce groups
//! - [`TotalOrderComparator`] - Sorts records inside a shard
//!
//! Sorting by [`TotalOrderComparator`] and then splitting runs where
//! [`GroupComparator`] reports a change yields exactly the groups obtained by
//! grouping first and sorting each group on its own.

#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod compare;
mod identity;
mod key;
mod partition;

pub use compare::{GroupComparator, KeyComparator, TotalOrderComparator, compare_group_only};
pub use identity::GroupIdentity;
pub use key::{KeyedRecord, OrderingKey};
pub use partition::{partition, partition_identity};
