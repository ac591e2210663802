//! # reducer-tree
//!
//! `reducer-tree` is an ordered map that additionally maintains the value of a
//! user-supplied associative reduction over every contiguous key range. Each
//! internal node caches the reduction of its subtree, so the fold over all
//! entries below a query key is computed in `O(log N)` expected time.
//!
//! The map is implemented as a treap: a binary search tree ordered by key in
//! which every node also carries a randomly sampled priority, and parents
//! never have a lower priority than their children. Random priorities give
//! the tree expected logarithmic depth without any explicit balancing
//! metadata.
//!
//! ## Usage
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! reducer-tree = "*"
//! ```
//!
//! ```rust
//! use reducer_tree::{Count, ReducerMap};
//!
//! let mut map: ReducerMap<u32, &str, Count> = ReducerMap::new();
//! map.insert(1, "a");
//! map.insert(3, "b");
//! map.insert(5, "c");
//!
//! assert_eq!(map.get(&3), Some(&"b"));
//! assert_eq!(map.prefix_lt(&5), Count(2));
//! assert_eq!(map.reduce(), Count(3));
//! ```
//!
//! ## References
//!  - [Randomized Search Trees](https://doi.org/10.1007/BF01940876)
//!  > Seidel, Raimund, and Cecilia R. Aragon. 1996. “Randomized Search Trees.” *Algorithmica* 16 (4): 464–97. doi:[10.1007/BF01940876](https://doi.org/10.1007/BF01940876).
//!  - [Fast set operations using treaps](https://dl.acm.org/citation.cfm?id=277660)
//!  > Blelloch, Guy E., and Margaret Reid-Miller. 1998. “Fast Set Operations Using Treaps.” In *Proceedings of the Tenth Annual Acm Symposium on Parallel Algorithms and Architectures*, 16–26. SPAA ’98. New York, NY, USA: ACM. doi:[10.1145/277651.277660](https://doi.org/10.1145/277651.277660).

#![warn(missing_docs)]

extern crate rand;

mod entry;
mod map;
mod node;
mod reduce;
mod tree;

pub use map::ReducerMap;
pub use reduce::{Count, Reduce};
