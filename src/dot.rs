//! Renders a [`Tree`] as a Graphviz DOT digraph and saves it to disk.
//!
//! Every real node gets exactly two outgoing edges. A present child is drawn with an `L` or `R`
//! label and a missing child points at its own little sentinel dot.
//!
//! # Examples
//!
//! ```
//! use bst_ipl::{dot, Tree};
//!
//! let tree: Tree<_> = [2, 1].into_iter().collect();
//!
//! assert_eq!(
//!     dot::to_dot(&tree),
//!     "digraph BST {
//!     node [fontname=\"Arial\"];
//!     n0 [label=\"2\"];
//!     n0 -> n1 [label=\"L\"];
//!     n1 [label=\"1\"];
//!     nullL1 [shape=point];
//!     n1 -> nullL1;
//!     nullR1 [shape=point];
//!     n1 -> nullR1;
//!     nullR0 [shape=point];
//!     n0 -> nullR0;
//! }
//! "
//! );
//! ```

use std::fmt;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::tree::{Node, Tree};

/// Something went wrong while writing a DOT file. In every case the file at the target path, if
/// there was one, is left as it was.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No file could be created next to the target. Nothing was written.
    #[error("could not open file {}", path.display())]
    Create {
        /// Where we tried to write.
        path: PathBuf,
        /// Why the OS said no.
        #[source]
        source: io::Error,
    },
    /// Writing the contents failed.
    #[error("could not write file {}", path.display())]
    Write {
        /// Where we tried to write.
        path: PathBuf,
        /// Why the OS said no.
        #[source]
        source: io::Error,
    },
    /// The contents were written but could not be moved into place.
    #[error("could not replace file {}", path.display())]
    Persist {
        /// Where we tried to write.
        path: PathBuf,
        /// Why the OS said no.
        #[source]
        source: io::Error,
    },
}

/// Which side of its parent a child hangs off.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn label(self) -> &'static str {
        match self {
            Side::Left => "L",
            Side::Right => "R",
        }
    }

    fn sentinel(self) -> &'static str {
        match self {
            Side::Left => "nullL",
            Side::Right => "nullR",
        }
    }
}

/// A tree that formats as its DOT description. See [`to_dot`].
pub struct Dot<'a, K>(&'a Tree<K>);

impl<'a, K> Dot<'a, K> {
    /// Wraps `tree` for formatting.
    pub fn new(tree: &'a Tree<K>) -> Self {
        Self(tree)
    }
}

impl<K> fmt::Display for Dot<'_, K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("digraph BST {\n    node [fontname=\"Arial\"];\n")?;
        if let Some(root) = self.0.root() {
            let mut next_id = 0;
            write_node(f, root, &mut next_id)?;
        }
        f.write_str("}\n")
    }
}

/// Builds the DOT description of `tree`. Nodes are numbered in pre-order (`n0` is the root) and
/// labelled with their key, so duplicate keys still get their own node.
pub fn to_dot<K>(tree: &Tree<K>) -> String
where
    K: fmt::Display,
{
    Dot::new(tree).to_string()
}

/// Writes `node` and everything below it. `next_id` is the id this node gets.
fn write_node<K>(f: &mut fmt::Formatter<'_>, node: &Node<K>, next_id: &mut usize) -> fmt::Result
where
    K: fmt::Display,
{
    let id = *next_id;
    *next_id += 1;

    writeln!(f, "    n{} [label=\"{}\"];", id, escape(node.key()))?;
    for (side, child) in [(Side::Left, node.left()), (Side::Right, node.right())] {
        match child {
            Some(child) => {
                writeln!(f, "    n{} -> n{} [label=\"{}\"];", id, next_id, side.label())?;
                write_node(f, child, next_id)?;
            }
            None => {
                writeln!(f, "    {}{} [shape=point];", side.sentinel(), id)?;
                writeln!(f, "    n{} -> {}{};", id, side.sentinel(), id)?;
            }
        }
    }
    Ok(())
}

/// Makes a key safe to put inside a quoted DOT string.
fn escape<K: fmt::Display>(key: &K) -> String {
    key.to_string().replace('\\', "\\\\").replace('"', "\\\"")
}

/// Writes `contents` to `path`. The contents go to a temporary file in the same directory which
/// then replaces `path` in one step, so a failure never leaves a partial file behind or clobbers
/// an earlier export.
pub fn save_dot_file(path: impl AsRef<Path>, contents: &str) -> Result<(), ExportError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(|source| {
        debug!(path = %path.display(), %source, "could not open DOT file");
        ExportError::Create {
            path: path.to_path_buf(),
            source,
        }
    })?;

    file.write_all(contents.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| {
            debug!(path = %path.display(), %source, "could not write DOT file");
            ExportError::Write {
                path: path.to_path_buf(),
                source,
            }
        })?;

    file.persist(path).map_err(|e| {
        debug!(path = %path.display(), source = %e.error, "could not move DOT file into place");
        ExportError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        }
    })?;

    debug!("DOT file saved: {}", path.display());
    Ok(())
}

impl<K> Tree<K>
where
    K: fmt::Display,
{
    /// Renders this tree with [`to_dot`] and writes it to `path` with [`save_dot_file`].
    pub fn save_dot(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        save_dot_file(path, &to_dot(self))
    }
}
