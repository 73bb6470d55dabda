//! Built-in functions available in the global scope

use crate::environment::Environment;
use crate::span::Span;
use crate::value::{Arity, Callable, NativeFunction, RuntimeError, Value};
use std::io::Write;
use std::rc::Rc;

const NATIVES: &[NativeFunction] = &[
    NativeFunction {
        name: "clock",
        arity: Arity::exact(0),
        func: clock,
    },
    NativeFunction {
        name: "print",
        arity: Arity::range(0, 1),
        func: print,
    },
];

/// Define every built-in in `env`
pub fn register(env: &mut Environment) {
    for native in NATIVES {
        let callable = Callable::Native(Rc::new(NativeFunction {
            name: native.name,
            arity: native.arity,
            func: native.func,
        }));
        env.define(native.name, Value::Function(callable));
    }
}

/// `clock()` - milliseconds since the Unix epoch
fn clock(_out: &mut dyn Write, _args: &[Value], _span: Span) -> Result<Value, RuntimeError> {
    Ok(Value::Int(chrono::Utc::now().timestamp_millis()))
}

/// `print(value)` - write the value and a newline; `print()` writes a blank line
fn print(out: &mut dyn Write, args: &[Value], span: Span) -> Result<Value, RuntimeError> {
    let written = match args.first() {
        Some(value) => writeln!(out, "{}", value),
        None => writeln!(out),
    };
    written.map_err(|e| RuntimeError::io(e, span))?;
    Ok(Value::Null)
}
