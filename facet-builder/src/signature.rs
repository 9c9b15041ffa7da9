//! Parameter descriptors for target constructors.
//!
//! A [`Signature`] is the ordered list of parameters a constructor declares.
//! It can be written by hand, or read off a type's [`Shape`] with
//! [`Signature::of`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use facet_core::{Def, Facet, Field, Shape, StructKind, Type, UserType};

/// How a constructor parameter is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    /// Positional parameter that must be supplied.
    Req,
    /// Positional parameter with a default.
    Opt,
    /// Catch-all for extra positional arguments.
    Rest,
    /// Keyword parameter that must be supplied.
    KeyReq,
    /// Keyword parameter with a default.
    Key,
    /// Catch-all for extra keyword arguments.
    KeyRest,
}

impl ParamKind {
    /// Returns true for parameters bound by position rather than by name.
    pub const fn is_positional(self) -> bool {
        matches!(self, ParamKind::Req | ParamKind::Opt | ParamKind::Rest)
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Req => "required positional",
            ParamKind::Opt => "optional positional",
            ParamKind::Rest => "variadic positional",
            ParamKind::KeyReq => "required keyword",
            ParamKind::Key => "optional keyword",
            ParamKind::KeyRest => "variadic keyword",
        };
        f.write_str(s)
    }
}

/// One entry of a constructor's declared parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Param {
    /// How the parameter is bound.
    pub kind: ParamKind,
    /// Parameter name. Positional parameters may be anonymous.
    pub name: Option<String>,
}

impl Param {
    /// A parameter of the given kind, without a name.
    pub const fn anonymous(kind: ParamKind) -> Self {
        Self { kind, name: None }
    }

    /// A parameter of the given kind, with a name.
    pub fn named(kind: ParamKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: Some(name.into()),
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} `{name}`", self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Ordered parameter list of a constructor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signature {
    params: Vec<Param>,
}

impl Signature {
    /// An empty signature (a constructor that takes nothing).
    pub const fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Reads the signature of `T`'s shape. See [`Signature::of_shape`].
    pub fn of<'facet, T: Facet<'facet>>() -> Self {
        Self::of_shape(T::SHAPE)
    }

    /// Describes how a value of `shape` is constructed.
    ///
    /// Named structs take one keyword parameter per field, under its
    /// serialized name. Fields that are `Option<_>` or `#[facet(default)]`
    /// are optional, and skipped fields are not parameters. A
    /// `#[facet(flatten)]` struct contributes its own fields as keywords;
    /// any other flattened field is the keyword catch-all.
    /// Tuple structs and tuples take their fields by position. Any other
    /// shape is built from one value, i.e. one required positional.
    pub fn of_shape(shape: &'static Shape) -> Self {
        let mut sig = Self::new();

        let Type::User(UserType::Struct(st)) = &shape.ty else {
            sig.params.push(Param::anonymous(ParamKind::Req));
            return sig;
        };

        for field in st.fields {
            if field.should_skip_deserializing() {
                continue;
            }

            if st.kind != StructKind::Struct {
                let kind = if is_optional(field) {
                    ParamKind::Opt
                } else {
                    ParamKind::Req
                };
                sig.params.push(Param::anonymous(kind));
                continue;
            }

            if !field.is_flattened() {
                sig.params
                    .push(Param::named(keyword_kind(field), field.effective_name()));
                continue;
            }

            match &field.shape().ty {
                Type::User(UserType::Struct(inner)) if inner.kind == StructKind::Struct => {
                    let all_optional = is_optional(field);
                    for inner_field in inner.fields {
                        if inner_field.should_skip_deserializing() {
                            continue;
                        }
                        let kind = if all_optional {
                            ParamKind::Key
                        } else {
                            keyword_kind(inner_field)
                        };
                        sig.params
                            .push(Param::named(kind, inner_field.effective_name()));
                    }
                }
                _ => sig.params.push(Param::named(ParamKind::KeyRest, field.name)),
            }
        }

        sig
    }

    /// Appends a parameter.
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Appends an anonymous required positional parameter.
    pub fn req(self) -> Self {
        self.param(Param::anonymous(ParamKind::Req))
    }

    /// Appends an anonymous optional positional parameter.
    pub fn opt(self) -> Self {
        self.param(Param::anonymous(ParamKind::Opt))
    }

    /// Appends a variadic positional parameter.
    pub fn rest(self) -> Self {
        self.param(Param::anonymous(ParamKind::Rest))
    }

    /// Appends a required keyword parameter.
    pub fn key_req(self, name: impl Into<String>) -> Self {
        self.param(Param::named(ParamKind::KeyReq, name))
    }

    /// Appends an optional keyword parameter.
    pub fn key(self, name: impl Into<String>) -> Self {
        self.param(Param::named(ParamKind::Key, name))
    }

    /// Appends the keyword catch-all.
    pub fn key_rest(self, name: impl Into<String>) -> Self {
        self.param(Param::named(ParamKind::KeyRest, name))
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Name of the keyword catch-all parameter, if there is one and it is named.
    pub fn key_rest_name(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|p| p.kind == ParamKind::KeyRest)
            .and_then(|p| p.name.as_deref())
    }
}

impl FromIterator<Param> for Signature {
    fn from_iter<I: IntoIterator<Item = Param>>(iter: I) -> Self {
        Self {
            params: iter.into_iter().collect(),
        }
    }
}

fn keyword_kind(field: &Field) -> ParamKind {
    if is_optional(field) {
        ParamKind::Key
    } else {
        ParamKind::KeyReq
    }
}

fn is_optional(field: &Field) -> bool {
    field.has_default() || matches!(field.shape().def, Def::Option(_))
}
