use crate::runtime::error::RuntimeError;
use crate::runtime::value::Value;

/// Process-wide builtin functions, resolved by name after environment lookup
/// misses. Arity failures come back as `Error` values like any other runtime
/// failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinFunction {
    Len,
    Print,
}

impl BuiltinFunction {
    pub fn name(self) -> &'static str {
        match self {
            Self::Len => "len",
            Self::Print => "print",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "len" => Some(Self::Len),
            "print" => Some(Self::Print),
            _ => None,
        }
    }

    pub fn call(self, args: Vec<Value>) -> Value {
        match self {
            Self::Len => {
                if args.len() != 1 {
                    return Value::error(RuntimeError::InvalidArgCount {
                        found: args.len(),
                        expected: 1,
                    });
                }
                match &args[0] {
                    Value::Str(value) => Value::Integer(value.len() as i64),
                    Value::List(elements) => Value::Integer(elements.len() as i64),
                    other => Value::error(RuntimeError::InvalidArgument {
                        type_name: other.type_name(),
                    }),
                }
            }
            Self::Print => {
                for arg in &args {
                    println!("{}", arg.to_output());
                }
                Value::Null
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_measures_string_bytes_and_list_elements() {
        assert!(matches!(
            BuiltinFunction::Len.call(vec![Value::string("hello")]),
            Value::Integer(5)
        ));
        assert!(matches!(
            BuiltinFunction::Len.call(vec![Value::list(vec![Value::Null, Value::Null])]),
            Value::Integer(2)
        ));
    }

    #[test]
    fn len_rejects_wrong_arity_and_unmeasurable_types() {
        let error = BuiltinFunction::Len.call(vec![]);
        assert_eq!(error.to_output(), "ERROR: invalid number of args 0, expected 1");

        let error = BuiltinFunction::Len.call(vec![Value::Integer(1)]);
        assert_eq!(error.to_output(), "ERROR: invalid argument INTEGER");
    }

    #[test]
    fn print_returns_null() {
        assert!(matches!(
            BuiltinFunction::Print.call(vec![Value::string("out")]),
            Value::Null
        ));
    }

    #[test]
    fn builtin_names_round_trip() {
        for builtin in [BuiltinFunction::Len, BuiltinFunction::Print] {
            assert_eq!(BuiltinFunction::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(BuiltinFunction::from_name("first"), None);
    }
}
