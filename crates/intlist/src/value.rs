//! The parsed tree.
//!
//! This module defines [`Value`], a node that is either a non-negative integer
//! or an ordered list of nodes. Lists own their children exclusively, so a
//! tree has no sharing and no cycles.
use alloc::{vec, vec::Vec};
use core::{
    fmt,
    hash::{Hash, Hasher},
    mem, slice,
};

/// A node of a parsed tree.
///
/// Comparison, hashing, cloning, formatting and dropping walk the tree with
/// an explicit worklist and work at any depth the parser accepts. Serde
/// serialization recurses; the compact `{:#}` form is valid JSON for trees
/// of unbounded depth.
///
/// # Examples
///
/// ```
/// use intlist::Value;
///
/// let v = Value::List(vec![Value::Integer(1), Value::List(vec![])]);
/// assert_eq!(v.to_string(), "[1, []]");
/// assert_eq!(format!("{v:#}"), "[1,[]]");
/// ```
// The `cfg_attr` keeps serde out of normal builds; tests always get it.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(untagged))]
pub enum Value {
    /// A number token.
    Integer(u64),
    /// A bracketed, comma-separated sequence.
    List(Vec<Value>),
}

impl Default for Value {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Integer(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl Value {
    /// Returns `true` if the value is an [`Integer`].
    ///
    /// [`Integer`]: Value::Integer
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(..))
    }

    /// Returns `true` if the value is a [`List`].
    ///
    /// [`List`]: Value::List
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(..))
    }

    /// The integer, if this is an [`Integer`](Value::Integer).
    #[must_use]
    pub fn as_integer(&self) -> Option<u64> {
        match self {
            Self::Integer(n) => Some(*n),
            Self::List(_) => None,
        }
    }

    /// The elements, if this is a [`List`](Value::List).
    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            Self::Integer(_) => None,
        }
    }

    /// Maximum bracket nesting: 0 for an integer, 1 for `[]` or `[1, 2]`,
    /// 2 for `[[1]]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use intlist::Value;
    ///
    /// let v = intlist::from_str("[1, [2, [3]], []]").unwrap();
    /// assert_eq!(v.depth(), 3);
    /// assert_eq!(Value::Integer(4).depth(), 0);
    /// ```
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut max = 0;
        let mut pending = vec![(self, 0)];
        while let Some((value, depth)) = pending.pop() {
            if let Self::List(items) = value {
                max = max.max(depth + 1);
                pending.extend(items.iter().map(|item| (item, depth + 1)));
            }
        }
        max
    }
}

// Deep trees would overflow the call stack with the recursive drop glue.
impl Drop for Value {
    fn drop(&mut self) {
        let Self::List(items) = self else {
            return;
        };
        if items.iter().all(Value::is_integer) {
            return;
        }
        let mut pending = mem::take(items);
        while let Some(mut value) = pending.pop() {
            if let Self::List(children) = &mut value {
                pending.append(children);
            }
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        let items = match self {
            Self::Integer(n) => return Self::Integer(*n),
            Self::List(items) => items,
        };

        // One entry per list being copied: source cursor and copied prefix.
        let mut open: Vec<(slice::Iter<'_, Value>, Vec<Value>)> =
            vec![(items.iter(), Vec::with_capacity(items.len()))];
        let mut finished = Vec::new();
        while let Some((source, copied)) = open.last_mut() {
            match source.next() {
                Some(Self::Integer(n)) => copied.push(Self::Integer(*n)),
                Some(Self::List(children)) => {
                    open.push((children.iter(), Vec::with_capacity(children.len())));
                }
                None => {
                    finished = mem::take(copied);
                    open.pop();
                    if let Some((_, parent)) = open.last_mut() {
                        parent.push(Self::List(mem::take(&mut finished)));
                    }
                }
            }
        }
        Self::List(finished)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Integer(a), Self::Integer(b)) if a == b => {}
                (Self::List(a), Self::List(b)) if a.len() == b.len() => {
                    pending.extend(a.iter().zip(b));
                }
                _ => return false,
            }
        }
        true
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut pending = vec![self];
        while let Some(value) = pending.pop() {
            match value {
                Self::Integer(n) => {
                    state.write_u8(0);
                    n.hash(state);
                }
                Self::List(items) => {
                    state.write_u8(1);
                    items.len().hash(state);
                    pending.extend(items.iter().rev());
                }
            }
        }
    }
}

/// Punctuation used by [`Value::render`].
struct Style {
    open: &'static str,
    close: &'static str,
    separator: &'static str,
    debug: bool,
}

impl Value {
    fn render(&self, f: &mut fmt::Formatter<'_>, style: &Style) -> fmt::Result {
        enum Step<'a> {
            Value(&'a Value),
            Separator,
            Close,
        }

        let mut steps = vec![Step::Value(self)];
        while let Some(step) = steps.pop() {
            match step {
                Step::Value(Value::Integer(n)) if style.debug => write!(f, "Integer({n})")?,
                Step::Value(Value::Integer(n)) => write!(f, "{n}")?,
                Step::Value(Value::List(items)) => {
                    f.write_str(style.open)?;
                    steps.push(Step::Close);
                    for (i, item) in items.iter().enumerate().rev() {
                        steps.push(Step::Value(item));
                        if i > 0 {
                            steps.push(Step::Separator);
                        }
                    }
                }
                Step::Separator => f.write_str(style.separator)?,
                Step::Close => f.write_str(style.close)?,
            }
        }
        Ok(())
    }
}

/// Renders `[1, [2, 3]]`, or `[1,[2,3]]` with the alternate flag.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if f.alternate() { "," } else { ", " };
        self.render(
            f,
            &Style {
                open: "[",
                close: "]",
                separator,
                debug: false,
            },
        )
    }
}

/// Renders `List([Integer(1), List([])])` on one line, alternate flag or not.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(
            f,
            &Style {
                open: "List([",
                close: "])",
                separator: ", ",
                debug: true,
            },
        )
    }
}
