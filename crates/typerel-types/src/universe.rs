//! The type universe: named-type definitions and the queries over them.
//!
//! A [`Universe`] holds every named type the front end has defined during one
//! analysis session, together with the methods declared on it. It answers
//! the questions the relation engine delegates to the type system:
//!
//! - [`Universe::underlying`]: the structural shape behind a named type
//! - [`Universe::method_set`]: the methods callable on a type, promoted
//!   methods included
//! - [`Universe::interface_method_set`]: an interface's methods with embedded
//!   interfaces flattened
//! - [`Universe::implements`]: whether a type satisfies an interface
//!
//! # Method Set Rules
//!
//! - The method set of a value `T` holds the value-receiver methods of `T`.
//!   The method set of `*T` holds both value- and pointer-receiver methods.
//! - Methods and fields of embedded fields are promoted, breadth first. The
//!   shallowest depth wins; two entries with the same name at the same depth
//!   cancel each other, and a field hides a method of the same name.
//! - Embedding `*S` makes the pointer-receiver methods of `S` reachable even
//!   through a value of the embedding type.
//! - A pointer to an interface has no methods.
//!
//! Named types that were never defined (packages referenced but not loaded)
//! are opaque: they have no underlying shape and no methods.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::object::Position;
use crate::types::{BasicKind, InterfaceType, MethodSig, Signature, Type, TypeName};

/// Upper bound on `type A B` chains followed by [`Universe::underlying`].
const MAX_NAMED_CHAIN: usize = 64;

// ============================================================================
// Definitions
// ============================================================================

/// A method declared on a named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    pub name: String,
    pub signature: Signature,
    /// Declared with a pointer receiver (`func (t *T) M()`).
    pub pointer_receiver: bool,
    pub pos: Position,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, signature: Signature, pointer_receiver: bool) -> Self {
        MethodDecl {
            name: name.into(),
            signature,
            pointer_receiver,
            pos: Position::default(),
        }
    }

    pub fn with_pos(mut self, pos: Position) -> Self {
        self.pos = pos;
        self
    }
}

/// Definition of a named type.
#[derive(Debug, Clone)]
pub struct NamedDef {
    pub name: TypeName,
    pub underlying: Type,
    pub methods: Vec<MethodDecl>,
}

// ============================================================================
// Method Sets
// ============================================================================

/// One method in a method set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub signature: Signature,
    /// The named type declaring the method, if it was reached through one.
    pub origin: Option<TypeName>,
    pub pointer_receiver: bool,
    /// Embedding depth; 0 for methods declared on the type itself.
    pub depth: usize,
}

impl Selection {
    /// Whether the method was promoted from an embedded member.
    pub fn is_promoted(&self) -> bool {
        self.depth > 0
    }
}

/// A method set, ordered by method name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSet {
    entries: BTreeMap<String, Selection>,
}

impl MethodSet {
    pub fn lookup(&self, name: &str) -> Option<&Selection> {
        self.entries.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Selection> {
        self.entries.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A type reached while searching embedded fields.
#[derive(Debug, Clone)]
struct Embedding {
    ty: Type,
    /// Reached through at least one pointer.
    indirect: bool,
    /// Reached more than once at the current depth.
    multiples: bool,
}

/// Per-depth candidates; `None` marks a name that collided.
type Candidates = BTreeMap<String, Option<Selection>>;

fn add_candidate(level: &mut Candidates, selection: Selection, reachable: bool, multiples: bool) {
    if !multiples && reachable && !level.contains_key(&selection.name) {
        level.insert(selection.name.clone(), Some(selection));
    } else {
        level.insert(selection.name, None);
    }
}

/// Merge entries for the same type reached several times at one depth.
fn consolidate(list: Vec<Embedding>) -> Vec<Embedding> {
    let mut out: Vec<Embedding> = Vec::with_capacity(list.len());
    for embedding in list {
        match out.iter_mut().find(|e| e.ty == embedding.ty) {
            Some(existing) => existing.multiples = true,
            None => out.push(embedding),
        }
    }
    out
}

// ============================================================================
// Universe
// ============================================================================

/// Named-type definitions for one analysis session.
#[derive(Debug, Clone)]
pub struct Universe {
    named: HashMap<TypeName, NamedDef>,
}

impl Default for Universe {
    fn default() -> Self {
        Universe::new()
    }
}

impl Universe {
    /// Create a universe holding only the predeclared `error` interface.
    pub fn new() -> Self {
        let mut universe = Universe {
            named: HashMap::new(),
        };
        let error = InterfaceType::new(vec![MethodSig::new(
            "Error",
            Signature::new(vec![], vec![Type::basic(BasicKind::String)]),
        )]);
        universe.define(TypeName::new("", "error"), Type::Interface(error));
        universe
    }

    /// Define (or redefine) a named type. Returns the previous definition.
    pub fn define(&mut self, name: TypeName, underlying: Type) -> Option<NamedDef> {
        let def = NamedDef {
            name: name.clone(),
            underlying,
            methods: Vec::new(),
        };
        self.named.insert(name, def)
    }

    /// Attach a method to a defined type. Returns false if `owner` is not
    /// defined.
    pub fn add_method(&mut self, owner: &TypeName, method: MethodDecl) -> bool {
        match self.named.get_mut(owner) {
            Some(def) => {
                def.methods.push(method);
                true
            }
            None => false,
        }
    }

    pub fn lookup(&self, name: &TypeName) -> Option<&NamedDef> {
        self.named.get(name)
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.named.contains_key(name)
    }

    /// Methods declared directly on a named type, in declaration order.
    pub fn declared_methods(&self, name: &TypeName) -> &[MethodDecl] {
        self.named
            .get(name)
            .map(|def| def.methods.as_slice())
            .unwrap_or_default()
    }

    /// Copy every named type declared in `package` from `other`, methods
    /// included, replacing existing definitions. Returns the number copied.
    pub fn merge_package(&mut self, other: &Universe, package: &str) -> usize {
        let mut merged = 0;
        for (name, def) in &other.named {
            if name.package == package {
                self.named.insert(name.clone(), def.clone());
                merged += 1;
            }
        }
        merged
    }

    /// Number of defined named types, predeclared ones included.
    pub fn len(&self) -> usize {
        self.named.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// The underlying shape of a type.
    ///
    /// Non-named types are their own underlying type. Undefined named types
    /// are returned unchanged.
    pub fn underlying<'a>(&'a self, ty: &'a Type) -> &'a Type {
        let mut current = ty;
        for _ in 0..MAX_NAMED_CHAIN {
            match current {
                Type::Named(name) => match self.named.get(name) {
                    Some(def) => current = &def.underlying,
                    None => return current,
                },
                _ => return current,
            }
        }
        current
    }

    /// The complete method list of an interface, embedded interfaces
    /// included, sorted by name.
    pub fn interface_method_set(&self, interface: &InterfaceType) -> Vec<MethodSig> {
        let mut methods = BTreeMap::new();
        let mut visiting = HashSet::new();
        self.collect_interface_methods(interface, &mut methods, &mut visiting);
        methods.into_values().collect()
    }

    fn collect_interface_methods(
        &self,
        interface: &InterfaceType,
        out: &mut BTreeMap<String, MethodSig>,
        visiting: &mut HashSet<TypeName>,
    ) {
        for method in &interface.methods {
            out.entry(method.name.clone())
                .or_insert_with(|| method.clone());
        }
        for embed in &interface.embeds {
            if let Type::Named(name) = embed {
                if !visiting.insert(name.clone()) {
                    continue;
                }
            }
            if let Type::Interface(inner) = self.underlying(embed) {
                self.collect_interface_methods(inner, out, visiting);
            }
        }
    }

    /// The method set of `ty`.
    pub fn method_set(&self, ty: &Type) -> MethodSet {
        let (base, indirect) = match ty {
            Type::Pointer { elem } => (elem.as_ref(), true),
            other => (other, false),
        };
        if indirect && matches!(self.underlying(base), Type::Interface(_)) {
            return MethodSet::default();
        }

        let mut resolved: Candidates = BTreeMap::new();
        let mut seen: HashSet<TypeName> = HashSet::new();
        let mut current = vec![Embedding {
            ty: base.clone(),
            indirect,
            multiples: false,
        }];
        let mut depth = 0;

        while !current.is_empty() {
            let mut methods: Candidates = BTreeMap::new();
            let mut fields: HashSet<String> = HashSet::new();
            let mut next = Vec::new();

            for embedding in &current {
                let mut origin = None;
                if let Type::Named(name) = &embedding.ty {
                    if !seen.insert(name.clone()) {
                        continue;
                    }
                    for method in self.declared_methods(name) {
                        let selection = Selection {
                            name: method.name.clone(),
                            signature: method.signature.clone(),
                            origin: Some(name.clone()),
                            pointer_receiver: method.pointer_receiver,
                            depth,
                        };
                        let reachable = embedding.indirect || !method.pointer_receiver;
                        add_candidate(&mut methods, selection, reachable, embedding.multiples);
                    }
                    origin = Some(name.clone());
                }

                match self.underlying(&embedding.ty) {
                    Type::Struct(st) => {
                        for field in &st.fields {
                            fields.insert(field.name.clone());
                            if field.embedded {
                                let (inner, is_ptr) = match &field.ty {
                                    Type::Pointer { elem } => (elem.as_ref(), true),
                                    other => (other, false),
                                };
                                next.push(Embedding {
                                    ty: inner.clone(),
                                    indirect: embedding.indirect || is_ptr,
                                    multiples: embedding.multiples,
                                });
                            }
                        }
                    }
                    Type::Interface(interface) => {
                        for method in self.interface_method_set(interface) {
                            let selection = Selection {
                                name: method.name,
                                signature: method.signature,
                                origin: origin.clone(),
                                pointer_receiver: false,
                                depth,
                            };
                            add_candidate(&mut methods, selection, true, embedding.multiples);
                        }
                    }
                    _ => {}
                }
            }

            for (name, candidate) in methods {
                if !resolved.contains_key(&name) {
                    let candidate = if fields.contains(&name) {
                        None
                    } else {
                        candidate
                    };
                    resolved.insert(name, candidate);
                }
            }
            for name in fields {
                resolved.entry(name).or_insert(None);
            }

            current = consolidate(next);
            depth += 1;
        }

        MethodSet {
            entries: resolved
                .into_iter()
                .filter_map(|(name, selection)| selection.map(|s| (name, s)))
                .collect(),
        }
    }

    /// The first interface method `ty` lacks or declares with a different
    /// signature, or `None` if `ty` satisfies the interface.
    pub fn missing_method(&self, ty: &Type, interface: &InterfaceType) -> Option<String> {
        let required = self.interface_method_set(interface);
        if required.is_empty() {
            return None;
        }
        let available = self.method_set(ty);
        required
            .into_iter()
            .find(|method| match available.lookup(&method.name) {
                Some(found) => !self.identical_signatures(&found.signature, &method.signature),
                None => true,
            })
            .map(|method| method.name)
    }

    /// Whether `ty` satisfies `interface`. Every type satisfies an interface
    /// with no methods.
    pub fn implements(&self, ty: &Type, interface: &InterfaceType) -> bool {
        self.missing_method(ty, interface).is_none()
    }

    /// Type identity.
    pub fn identical(&self, a: &Type, b: &Type) -> bool {
        match (a, b) {
            (Type::Basic { name: x }, Type::Basic { name: y }) => x == y,
            (Type::Named(x), Type::Named(y)) => x == y,
            (Type::Pointer { elem: x }, Type::Pointer { elem: y }) => self.identical(x, y),
            (Type::Slice { elem: x }, Type::Slice { elem: y }) => self.identical(x, y),
            (Type::Array { len: lx, elem: x }, Type::Array { len: ly, elem: y }) => {
                lx == ly && self.identical(x, y)
            }
            (Type::Map { key: kx, value: vx }, Type::Map { key: ky, value: vy }) => {
                self.identical(kx, ky) && self.identical(vx, vy)
            }
            (Type::Chan { dir: dx, elem: x }, Type::Chan { dir: dy, elem: y }) => {
                dx == dy && self.identical(x, y)
            }
            (Type::Signature(x), Type::Signature(y)) => self.identical_signatures(x, y),
            (Type::Struct(x), Type::Struct(y)) => {
                x.fields.len() == y.fields.len()
                    && x.fields.iter().zip(&y.fields).all(|(f, g)| {
                        f.name == g.name && f.embedded == g.embedded && self.identical(&f.ty, &g.ty)
                    })
            }
            (Type::Interface(x), Type::Interface(y)) => {
                let mx = self.interface_method_set(x);
                let my = self.interface_method_set(y);
                mx.len() == my.len()
                    && mx.iter().zip(&my).all(|(m, n)| {
                        m.name == n.name && self.identical_signatures(&m.signature, &n.signature)
                    })
            }
            _ => false,
        }
    }

    /// Signature identity; parameter names never matter.
    pub fn identical_signatures(&self, a: &Signature, b: &Signature) -> bool {
        a.variadic == b.variadic
            && a.params.len() == b.params.len()
            && a.results.len() == b.results.len()
            && a.params.iter().zip(&b.params).all(|(x, y)| self.identical(x, y))
            && a.results.iter().zip(&b.results).all(|(x, y)| self.identical(x, y))
    }
}
