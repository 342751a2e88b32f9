//! `$` variables and the chain of active contract calls.
//!
//! The root frame holds the environment the host passed to the call. Every
//! contract invocation pushes a frame whose parent is the frame that was
//! current when the call was made; the frame is popped when the contract
//! returns. Parents are indices into the same stack, so a frame never
//! outlives the caller it points at.

use pact_value::{Value, ValueMap};
use rustc_hash::FxHashMap;

#[derive(Debug)]
struct Frame {
    /// Contract name; empty for the root frame.
    name: String,
    vars: FxHashMap<String, Value>,
    parent: Option<usize>,
}

#[derive(Debug)]
pub(crate) struct Frames {
    stack: Vec<Frame>,
}

impl Frames {
    pub(crate) fn new(env: ValueMap) -> Self {
        Frames {
            stack: vec![Frame {
                name: String::new(),
                vars: env.into_iter().collect(),
                parent: None,
            }],
        }
    }

    fn current(&self) -> usize {
        self.stack.len() - 1
    }

    /// Enter a contract. Its parent is the frame current before the push.
    ///
    /// `$result` always belongs to the new frame so that writing it never
    /// reaches a caller's.
    pub(crate) fn push(&mut self, name: &str, mut vars: FxHashMap<String, Value>) {
        vars.entry("result".to_string()).or_default();
        let parent = Some(self.current());
        self.stack.push(Frame {
            name: name.to_string(),
            vars,
            parent,
        });
    }

    /// Leave the innermost contract, returning its `$result`.
    pub(crate) fn pop(&mut self) -> Value {
        if self.stack.len() == 1 {
            return Value::Nil;
        }
        self.stack
            .pop()
            .and_then(|mut frame| frame.vars.remove("result"))
            .unwrap_or_default()
    }

    /// Name of the contract that invoked the current one.
    pub(crate) fn parent_name(&self) -> &str {
        self.stack[self.current()]
            .parent
            .map_or("", |parent| self.stack[parent].name.as_str())
    }

    /// Read `$name`, falling back through enclosing frames. Unset names
    /// read as `nil`.
    pub(crate) fn get(&self, name: &str) -> Value {
        if name == "parent" {
            return Value::string(self.parent_name());
        }
        self.lookup(name).cloned().unwrap_or_default()
    }

    /// `$name` by reference. `$parent` is not a stored variable and is
    /// never found here.
    pub(crate) fn lookup(&self, name: &str) -> Option<&Value> {
        self.find_from(self.current(), name)
            .and_then(|index| self.stack[index].vars.get(name))
    }

    /// Read `$parent.name`.
    pub(crate) fn get_parent(&self, name: &str) -> Value {
        self.lookup_parent(name).cloned().unwrap_or_default()
    }

    pub(crate) fn lookup_parent(&self, name: &str) -> Option<&Value> {
        self.find_from(self.parent_or_root(), name)
            .and_then(|index| self.stack[index].vars.get(name))
    }

    /// Slot for writing `$name`: the nearest frame that has it, otherwise a
    /// new variable of the current frame.
    pub(crate) fn slot(&mut self, name: &str) -> &mut Value {
        let start = self.current();
        self.slot_from(start, name)
    }

    /// Slot for writing `$parent.name`.
    pub(crate) fn parent_slot(&mut self, name: &str) -> &mut Value {
        let start = self.parent_or_root();
        self.slot_from(start, name)
    }

    /// The host environment with every write made during the call.
    pub(crate) fn into_env(mut self) -> ValueMap {
        self.stack.truncate(1);
        self.stack
            .pop()
            .map(|root| root.vars.into_iter().collect())
            .unwrap_or_default()
    }

    fn parent_or_root(&self) -> usize {
        self.stack[self.current()].parent.unwrap_or(0)
    }

    fn find_from(&self, start: usize, name: &str) -> Option<usize> {
        let mut index = Some(start);
        while let Some(i) = index {
            let frame = &self.stack[i];
            if frame.vars.contains_key(name) {
                return Some(i);
            }
            index = frame.parent;
        }
        None
    }

    fn slot_from(&mut self, start: usize, name: &str) -> &mut Value {
        let index = self.find_from(start, name).unwrap_or(start);
        self.stack[index]
            .vars
            .entry(name.to_string())
            .or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn root() -> Frames {
        let mut env = ValueMap::new();
        env.insert("key_id".to_string(), Value::Int(7));
        Frames::new(env)
    }

    #[test]
    fn test_lookup_falls_through_to_callers() {
        let mut frames = root();
        frames.push("outer", FxHashMap::default());
        assert_eq!(frames.get("key_id"), Value::Int(7));
        assert_eq!(frames.get("missing"), Value::Nil);
    }

    #[test]
    fn test_parent_name() {
        let mut frames = root();
        assert_eq!(frames.get("parent"), Value::string(""));
        frames.push("outer", FxHashMap::default());
        frames.push("inner", FxHashMap::default());
        assert_eq!(frames.get("parent"), Value::string("outer"));
        frames.pop();
        assert_eq!(frames.parent_name(), "");
    }

    #[test]
    fn test_writes_go_to_the_defining_frame() {
        let mut frames = root();
        frames.push("c", FxHashMap::default());
        *frames.slot("key_id") = Value::Int(8);
        *frames.slot("local") = Value::Int(1);
        frames.pop();
        assert_eq!(frames.get("local"), Value::Nil);

        let env = frames.into_env();
        assert_eq!(env.get("key_id"), Some(&Value::Int(8)));
    }

    #[test]
    fn test_parent_slot_writes_into_the_caller() {
        let mut frames = root();
        frames.push("outer", FxHashMap::default());
        frames.push("inner", FxHashMap::default());
        *frames.parent_slot("shared") = Value::string("from inner");
        assert_eq!(frames.get_parent("shared"), Value::string("from inner"));
        frames.pop();
        assert_eq!(frames.get("shared"), Value::string("from inner"));
    }

    #[test]
    fn test_pop_returns_result() {
        let mut frames = root();
        let mut vars = FxHashMap::default();
        vars.insert("result".to_string(), Value::Int(3));
        frames.push("c", vars);
        assert_eq!(frames.pop(), Value::Int(3));
        assert_eq!(frames.pop(), Value::Nil);
    }

    #[test]
    fn test_result_is_per_contract() {
        let mut frames = root();
        frames.push("outer", FxHashMap::default());
        *frames.slot("result") = Value::string("outer");
        frames.push("inner", FxHashMap::default());
        assert_eq!(frames.get("result"), Value::Nil);
        *frames.slot("result") = Value::string("inner");
        assert_eq!(frames.pop(), Value::string("inner"));
        assert_eq!(frames.pop(), Value::string("outer"));
    }
}
