use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use facet_core::{Def, Facet, Shape, Type, UserType};
use facet_reflect::{Poke, ReflectError};
use facet_value::{VObject, Value, from_value};

use crate::error::{ConstructError, MissingKeywordError};
use crate::schema::SchemaError;
use crate::signature::{ParamKind, Signature};
use crate::value::Attrs;

type ConstructFn<T> = dyn Fn(Attrs) -> Result<T, ConstructError> + Send + Sync;

/// A way of constructing `T` from keyword attributes, together with the
/// parameters it declares.
///
/// The name is the constructor selector: a type can have several
/// constructors, and a builder definition is made for one of them.
pub struct Constructor<T> {
    name: Cow<'static, str>,
    target: &'static str,
    signature: Signature,
    call: Arc<ConstructFn<T>>,
}

impl<T> Clone for Constructor<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            target: self.target,
            signature: self.signature.clone(),
            call: Arc::clone(&self.call),
        }
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl<T> Constructor<T> {
    /// A constructor named `name` that declares `signature` and builds `T`
    /// with `f`.
    ///
    /// `f` receives the assembled attributes exactly as assigned: blocks are
    /// not called, lists and maps are not lowered. Whatever error it returns
    /// is passed through to the caller of `build` untouched.
    pub fn new<F, E>(name: impl Into<Cow<'static, str>>, signature: Signature, f: F) -> Self
    where
        T: 'static,
        F: Fn(Attrs) -> Result<T, E> + Send + Sync + 'static,
        E: Into<ConstructError> + 'static,
    {
        Self {
            name: name.into(),
            target: short_type_name::<T>(),
            signature,
            call: Arc::new(move |attrs: Attrs| -> Result<T, ConstructError> {
                f(attrs).map_err(Into::into)
            }),
        }
    }

    /// The constructor selector.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the constructed type.
    pub const fn target(&self) -> &'static str {
        self.target
    }

    /// The declared parameters.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Invokes the constructor.
    ///
    /// Fails with [`MissingKeywordError`] before anything runs if a required
    /// keyword of the signature holds no value.
    pub fn call(&self, attrs: Attrs) -> Result<T, ConstructError> {
        let missing: Vec<String> = self
            .signature
            .params()
            .iter()
            .filter(|p| p.kind == ParamKind::KeyReq)
            .filter_map(|p| p.name.as_deref())
            .filter(|name| !attrs.contains_key(*name))
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(MissingKeywordError {
                keys: missing,
                target: self.target,
            }
            .into());
        }

        (self.call)(attrs)
    }
}

impl<T: Facet<'static> + 'static> Constructor<T> {
    /// The default constructor of a `Facet` type, named `"default"`.
    ///
    /// Its parameters are read off `T::SHAPE` (see [`Signature::of_shape`]).
    /// Declared attributes are lowered to a [`facet_value::Value`] object and
    /// deserialized with [`facet_value::from_value`]. Undeclared attributes
    /// are then inserted into the `#[facet(flatten)]` catch-all map.
    ///
    /// Fails if the catch-all is not a map from `String` to `Value`.
    pub fn reflect() -> Result<Self, SchemaError> {
        let signature = Signature::of_shape(T::SHAPE);
        let rest = signature.key_rest_name().map(String::from);
        if let Some(rest) = &rest {
            check_catch_all(T::SHAPE, rest)?;
        }
        let declared = signature.clone();

        Ok(Self {
            name: Cow::Borrowed("default"),
            target: T::SHAPE.type_identifier,
            signature,
            call: Arc::new(move |attrs: Attrs| -> Result<T, ConstructError> {
                let (fields, extra) = lower_attrs(&declared, rest.is_some(), attrs);
                trace!(shape = T::SHAPE.type_identifier, "deserializing from {fields:?}");
                let mut target = from_value::<T>(fields)?;
                if let Some(rest) = &rest {
                    fill_catch_all(&mut target, rest, extra)?;
                }
                Ok(target)
            }),
        })
    }
}

fn check_catch_all(shape: &'static Shape, name: &str) -> Result<(), SchemaError> {
    let Type::User(UserType::Struct(st)) = &shape.ty else {
        return Ok(());
    };
    let Some(field) = st.fields.iter().find(|f| f.name == name) else {
        return Ok(());
    };

    let field_shape = field.shape();
    match &field_shape.def {
        Def::Map(map) if *map.k() == *String::SHAPE && *map.v() == *Value::SHAPE => Ok(()),
        _ => Err(SchemaError::UnsupportedCatchAll {
            field: field.name,
            shape: field_shape.type_identifier,
        }),
    }
}

/// Splits `attrs` into an object of declared keywords and the undeclared
/// rest. Without a catch-all everything goes into the object.
fn lower_attrs(
    signature: &Signature,
    catch_all: bool,
    attrs: Attrs,
) -> (Value, Vec<(String, Value)>) {
    let mut obj = VObject::with_capacity(attrs.len());
    let mut extra = Vec::new();

    for (key, value) in attrs {
        let declared = signature
            .params()
            .iter()
            .any(|p| p.kind != ParamKind::KeyRest && p.name.as_deref() == Some(key.as_str()));
        if declared || !catch_all {
            obj.insert(key, value.into_value());
        } else {
            extra.push((key, value.into_value()));
        }
    }

    (obj.into(), extra)
}

fn fill_catch_all<T: Facet<'static>>(
    target: &mut T,
    field: &str,
    extra: Vec<(String, Value)>,
) -> Result<(), ReflectError> {
    let mut target = Poke::new(target).into_struct()?;
    let mut map = target.field_by_name(field)?.into_map()?;
    for (key, value) in extra {
        map.insert(key, value)?;
    }
    Ok(())
}

fn short_type_name<T>() -> &'static str {
    let full = core::any::type_name::<T>();
    // drop the module path of the outermost type, keep generic arguments
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(idx) => &full[idx + 2..],
        None => full,
    }
}
