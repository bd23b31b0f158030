//! A line oriented command language for driving sets, used by the demo and the benchmark
//!
//! Each line holds one command:
//!
//! ```text
//! insert 5
//! erase 5
//! check 5     # prints 1 if 5 is present, 0 otherwise
//! count 5     # prints the number of copies of 5
//! size        # prints the number of keys
//! ```
//!
//! Blank lines and lines starting with `#` are skipped.

extern crate alloc;

use alloc::{collections::BTreeSet, string::ToString};
use core::{fmt, str::FromStr};

use log::debug;

use crate::error::{Error, Result};
use crate::multiset::MultiSet;
use crate::set::Set;

//-----------------------------------------------------------------------------------------------//

/// A single harness command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Insert a key
    Insert(i64),
    /// Erase every copy of a key
    Erase(i64),
    /// Report whether a key is present
    Check(i64),
    /// Report the number of copies of a key
    Count(i64),
    /// Report the number of keys
    Size,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Command> {
        let mut words = s.split_whitespace();
        let name = words.next().unwrap_or_default();

        let mut argument = || -> Result<i64> {
            match words.next() {
                Some(word) => Ok(word.parse()?),
                None => Err(Error::MissingArgument(name.to_string())),
            }
        };

        match name {
            "insert" => Ok(Command::Insert(argument()?)),
            "erase" => Ok(Command::Erase(argument()?)),
            "check" => Ok(Command::Check(argument()?)),
            "count" => Ok(Command::Count(argument()?)),
            "size" => Ok(Command::Size),
            _ => Err(Error::UnknownCommand(name.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Insert(key) => write!(f, "insert {key}"),
            Command::Erase(key) => write!(f, "erase {key}"),
            Command::Check(key) => write!(f, "check {key}"),
            Command::Count(key) => write!(f, "count {key}"),
            Command::Size => write!(f, "size"),
        }
    }
}

/// Parse one line of input, returning `None` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    line.parse().map(Some)
}

//-----------------------------------------------------------------------------------------------//

/// A collection that commands can be run against
pub trait Target {
    /// A short name for reports
    fn name(&self) -> &'static str;

    /// Insert a key, returning whether the collection grew
    fn insert(&mut self, key: i64) -> bool;

    /// Erase every copy of a key, returning how many were removed
    fn erase(&mut self, key: i64) -> usize;

    /// Look a key up. Self adjusting collections may reshape themselves.
    fn check(&mut self, key: i64) -> bool;

    /// Count the copies of a key
    fn count(&mut self, key: i64) -> usize;

    /// The number of keys
    fn len(&self) -> usize;
}

impl Target for Set<i64> {
    fn name(&self) -> &'static str {
        "splay tree set"
    }

    fn insert(&mut self, key: i64) -> bool {
        Set::insert(self, key)
    }

    fn erase(&mut self, key: i64) -> usize {
        usize::from(self.remove(&key))
    }

    fn check(&mut self, key: i64) -> bool {
        self.get(&key).is_some()
    }

    fn count(&mut self, key: i64) -> usize {
        Set::count(self, &key)
    }

    fn len(&self) -> usize {
        Set::len(self)
    }
}

impl Target for MultiSet<i64> {
    fn name(&self) -> &'static str {
        "splay tree multiset"
    }

    fn insert(&mut self, key: i64) -> bool {
        MultiSet::insert(self, key);
        true
    }

    fn erase(&mut self, key: i64) -> usize {
        self.remove_all(&key)
    }

    fn check(&mut self, key: i64) -> bool {
        self.get(&key).is_some()
    }

    fn count(&mut self, key: i64) -> usize {
        MultiSet::count(self, &key)
    }

    fn len(&self) -> usize {
        MultiSet::len(self)
    }
}

impl Target for BTreeSet<i64> {
    fn name(&self) -> &'static str {
        "btree set"
    }

    fn insert(&mut self, key: i64) -> bool {
        BTreeSet::insert(self, key)
    }

    fn erase(&mut self, key: i64) -> usize {
        usize::from(self.remove(&key))
    }

    fn check(&mut self, key: i64) -> bool {
        self.contains(&key)
    }

    fn count(&mut self, key: i64) -> usize {
        usize::from(self.contains(&key))
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

//-----------------------------------------------------------------------------------------------//

/// Runs commands against a target, writing answers to an output
pub struct Session<T> {
    target: T,
    executed: usize,
}

impl<T: Target> Session<T> {
    /// Constructor
    pub fn new(target: T) -> Session<T> {
        Session {
            target,
            executed: 0,
        }
    }

    /// Run one command
    ///
    /// `check`, `count` and `size` write a line with their answer, the other commands are silent.
    pub fn execute<W: fmt::Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        self.executed += 1;
        match command {
            Command::Insert(key) => {
                self.target.insert(key);
            }
            Command::Erase(key) => {
                self.target.erase(key);
            }
            Command::Check(key) => writeln!(out, "{}", u8::from(self.target.check(key)))?,
            Command::Count(key) => writeln!(out, "{}", self.target.count(key))?,
            Command::Size => writeln!(out, "{}", self.target.len())?,
        }
        Ok(())
    }

    /// Parse and run one line of input
    pub fn execute_line<W: fmt::Write>(&mut self, line: &str, out: &mut W) -> Result<()> {
        match parse_line(line) {
            Ok(Some(command)) => self.execute(command, out),
            Ok(None) => Ok(()),
            Err(e) => {
                debug!("rejected line '{line}': {e}");
                Err(e)
            }
        }
    }

    /// The number of commands run so far
    pub fn executed(&self) -> usize {
        self.executed
    }

    /// The collection commands are run against
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Finish the session, returning the collection
    pub fn into_target(self) -> T {
        self.target
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
fn test_harness_0() {
    assert_eq!("insert 5".parse::<Command>(), Ok(Command::Insert(5)));
    assert_eq!("  count   -3 ".parse::<Command>(), Ok(Command::Count(-3)));
    assert_eq!("size".parse::<Command>(), Ok(Command::Size));
    assert_eq!(
        "count".parse::<Command>(),
        Err(Error::MissingArgument("count".to_string()))
    );
    assert_eq!(
        "find 1".parse::<Command>(),
        Err(Error::UnknownCommand("find".to_string()))
    );
    assert!(matches!(
        "erase x".parse::<Command>(),
        Err(Error::InvalidArgument(_))
    ));

    assert_eq!(parse_line("# a comment"), Ok(None));
    assert_eq!(parse_line(""), Ok(None));
    assert_eq!(Command::Check(7).to_string(), "check 7");
}

#[test]
// A short script gives the same answers on every target
fn test_harness_1() {
    use alloc::string::String;

    const SCRIPT: &str = "insert 2\ninsert 1\ninsert 4\ninsert 3\ninsert 5\n\
                          count 1\ncount 2\ncount 3\ncount 4\ncheck 6\nsize\n\
                          erase 3\ncount 3\nsize\n";
    const EXPECTED: &str = "1\n1\n1\n1\n0\n5\n0\n4\n";

    let mut splay = Session::new(Set::<i64>::new());
    let mut multi = Session::new(MultiSet::<i64>::new());
    let mut btree = Session::new(BTreeSet::<i64>::new());

    let mut a = String::new();
    let mut b = String::new();
    let mut c = String::new();
    for line in SCRIPT.lines() {
        splay.execute_line(line, &mut a).unwrap();
        multi.execute_line(line, &mut b).unwrap();
        btree.execute_line(line, &mut c).unwrap();
    }

    assert_eq!(a, EXPECTED);
    assert_eq!(b, EXPECTED);
    assert_eq!(c, EXPECTED);
    assert_eq!(splay.executed(), 14);
    splay.target().as_tree().assert_correctness();
}

#[test]
// Repeated inserts only show up in the multiset
fn test_harness_2() {
    use alloc::string::String;

    let mut set = Session::new(Set::<i64>::new());
    let mut multi = Session::new(MultiSet::<i64>::new());
    let mut a = String::new();
    let mut b = String::new();

    for command in [Command::Insert(9), Command::Insert(9), Command::Count(9)] {
        set.execute(command, &mut a).unwrap();
        multi.execute(command, &mut b).unwrap();
    }

    assert_eq!(a, "1\n");
    assert_eq!(b, "2\n");
    assert_eq!(multi.into_target().len(), 2);
}
