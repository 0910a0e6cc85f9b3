//! Lexical scopes.
//!
//! An [`Environment`] is a cheap, cloneable handle to one scope. Scopes link
//! to their parent, and a child never outlives the handles that created it.
//! Handles use `Rc`, so environments are not thread-safe and must not be
//! shared between threads.
//!
//! A function value keeps a handle to the scope it was declared in, and that
//! scope holds the function. The resulting reference cycle is never freed;
//! this is bounded by the number of function declarations evaluated.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Span,
};

use super::values::RuntimeVal;

#[derive(Debug, Clone)]
pub struct Variable {
    pub is_constant: bool,
    pub value: RuntimeVal,
}

struct Scope {
    variables: HashMap<String, Variable>,
    parent: Option<Environment>,
}

#[derive(Clone)]
pub struct Environment(Rc<RefCell<Scope>>);

// Scopes reach themselves through captured functions, so only names are shown
impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.0.borrow();
        let mut names: Vec<&String> = scope.variables.keys().collect();
        names.sort();

        f.debug_struct("Environment")
            .field("variables", &names)
            .field("has_parent", &scope.parent.is_some())
            .finish()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}

impl Environment {
    /// A new root scope with no bindings.
    pub fn new() -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            variables: HashMap::new(),
            parent: None,
        })))
    }

    /// A new root scope holding `constants`. Later entries replace earlier
    /// ones with the same name.
    pub fn with_constants(constants: impl IntoIterator<Item = (String, RuntimeVal)>) -> Self {
        let variables = constants
            .into_iter()
            .map(|(name, value)| {
                let variable = Variable {
                    is_constant: true,
                    value,
                };
                (name, variable)
            })
            .collect();

        Environment(Rc::new(RefCell::new(Scope { variables, parent: None })))
    }

    /// A new empty scope whose parent is `self`.
    pub fn child(&self) -> Self {
        Environment(Rc::new(RefCell::new(Scope {
            variables: HashMap::new(),
            parent: Some(self.clone()),
        })))
    }

    pub fn parent(&self) -> Option<Environment> {
        self.0.borrow().parent.clone()
    }

    /// The root of this scope chain.
    pub fn global(&self) -> Environment {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Whether both handles refer to the same scope.
    pub fn same_scope(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Binds `name` in this scope. Shadowing an outer binding is allowed,
    /// redeclaring one in the same scope is not.
    pub fn declare(&self, name: &str, value: RuntimeVal, is_constant: bool, span: &Span) -> Result<RuntimeVal, Error> {
        let mut scope = self.0.borrow_mut();
        if scope.variables.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.to_string(),
                },
                span.clone(),
            ));
        }

        scope.variables.insert(
            name.to_string(),
            Variable {
                is_constant,
                value: value.clone(),
            },
        );
        Ok(value)
    }

    /// Rebinds `name` in the scope that declared it.
    pub fn assign(&self, name: &str, value: RuntimeVal, span: &Span) -> Result<RuntimeVal, Error> {
        let owner = self.resolve(name, span)?;
        let mut scope = owner.0.borrow_mut();

        match scope.variables.get_mut(name) {
            Some(variable) if variable.is_constant => Err(Error::new(
                ErrorImpl::ConstantReassignment {
                    variable: name.to_string(),
                },
                span.clone(),
            )),
            Some(variable) => {
                variable.value = value.clone();
                Ok(value)
            }
            None => Err(not_declared(name, span)),
        }
    }

    pub fn lookup(&self, name: &str, span: &Span) -> Result<Variable, Error> {
        let owner = self.resolve(name, span)?;
        let scope = owner.0.borrow();

        scope.variables.get(name).cloned().ok_or_else(|| not_declared(name, span))
    }

    /// Finds the scope in this chain that declares `name`.
    pub fn resolve(&self, name: &str, span: &Span) -> Result<Environment, Error> {
        let mut current = self.clone();
        loop {
            if current.0.borrow().variables.contains_key(name) {
                return Ok(current);
            }

            match current.parent() {
                Some(parent) => current = parent,
                None => return Err(not_declared(name, span)),
            }
        }
    }

    /// Whether `name` is declared in this scope itself.
    pub fn has_own(&self, name: &str) -> bool {
        self.0.borrow().variables.contains_key(name)
    }
}

fn not_declared(name: &str, span: &Span) -> Error {
    Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: name.to_string(),
        },
        span.clone(),
    )
}
