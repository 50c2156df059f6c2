//! `MAKE_PROPERTY` and `MAKE_SEQ`: elements and sequences published
//! through accessor methods the class already has.
//!
//! Accessors are named by function group. Each role takes the first
//! overload of its group that fits; when none fits, the whole declaration
//! is dropped with a diagnostic.

use cpp_types::{
    FunctionType, Instance, MakeProperty, MakeSeq, PropertyKind, ScopeId, StructId, TypeData,
};
use interrogate_db::{
    ElementFlags, ElementIndex, FunctionFlags, FunctionIndex, InterrogateElement,
    InterrogateMakeSeq, MakeSeqIndex, TypeIndex,
};

use super::InterrogateBuilder;
use crate::names::{descope, trim_blanks};

/// The overloads of the group `name` in `scope`, with resolved types.
fn overloads(
    b: &mut InterrogateBuilder,
    subject: &str,
    name: &str,
    scope: ScopeId,
) -> Option<Vec<(Instance, FunctionType)>> {
    let found = b
        .pool
        .scope(scope)
        .function_group(name)
        .map(|group| group.instances.clone());
    let Some(ids) = found else {
        b.diagnose(subject, format!("no method named `{name}`"));
        return None;
    };
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        let inst = b.pool.instance(id).clone();
        let ty = b.pool.resolve_type(inst.ty, scope);
        if let Some(ftype) = b.pool.get(ty).as_function().cloned() {
            out.push((inst, ftype));
        }
    }
    Some(out)
}

/// The first overload of `group` that `fits` and gets a function index.
fn pick(
    b: &mut InterrogateBuilder,
    subject: &str,
    role: &str,
    group: Option<&str>,
    strct: StructId,
    scope: ScopeId,
    fits: impl Fn(&InterrogateBuilder, &FunctionType) -> bool,
) -> Result<Option<(Instance, FunctionIndex)>, ()> {
    let Some(group) = group else {
        return Ok(None);
    };
    let candidates = overloads(b, subject, group, scope).ok_or(())?;
    for (inst, ftype) in candidates {
        if !fits(b, &ftype) {
            continue;
        }
        let index = b.get_function(&inst, Some(strct), scope, FunctionFlags::empty());
        if index.is_some() {
            return Ok(Some((inst, index)));
        }
    }
    b.diagnose(subject, format!("no instance of {role} `{group}` is suitable"));
    Err(())
}

/// Whether the parameter at `position` is the first one a call may omit,
/// or there are exactly `position` parameters.
fn takes_args(ftype: &FunctionType, position: usize) -> bool {
    let params = &ftype.params.params;
    params.len() == position
        || params
            .get(position)
            .is_some_and(|p| p.initializer.is_some())
}

pub(super) fn get_make_property(
    b: &mut InterrogateBuilder,
    prop: &MakeProperty,
    strct: StructId,
    scope: ScopeId,
) -> ElementIndex {
    let property_name = b.pool.qualify(scope, &prop.name);
    let subject = property_name.as_str();

    let mut index = ElementIndex::NONE;
    if let Some((known, declared)) = b.properties_by_name.get(&property_name) {
        let known = *known;
        if declared == prop {
            return known;
        }
        let record = b.db.get_element(known);
        if (record.is_sequence() || record.is_mapping()) != (prop.kind != PropertyKind::Normal) {
            b.diagnose(subject, "conflicting property definitions");
            return known;
        }
        index = known;
    }

    let keyed = prop.kind != PropertyKind::Normal;
    let num_args = usize::from(keyed);

    let Ok(length) = pick(b, subject, "length method", prop.length.as_deref(), strct, scope, |_, _| true)
    else {
        return ElementIndex::NONE;
    };

    // A getter without a preference for constness: a non-const overload
    // wins over an earlier const one.
    let mut getter: Option<(Instance, FunctionType)> = None;
    if let Some(group) = prop.getter.as_deref() {
        let Some(candidates) = overloads(b, subject, group, scope) else {
            return ElementIndex::NONE;
        };
        for (inst, ftype) in candidates {
            if !takes_args(&ftype, num_args) {
                continue;
            }
            if prop.kind == PropertyKind::Sequence
                && !ftype
                    .params
                    .params
                    .first()
                    .is_some_and(|p| b.pool.is_integer(p.ty))
            {
                continue;
            }
            let is_const = ftype.is_const_method();
            getter = Some((inst, ftype));
            if !is_const {
                break;
            }
        }
        if getter.is_none() {
            b.diagnose(subject, format!("no instance of getter `{group}` is suitable"));
            return ElementIndex::NONE;
        }
    }

    let Ok(hasser) = pick(b, subject, "has-function", prop.hasser.as_deref(), strct, scope, |b, f| {
        b.pool.is_integer(f.return_type) || matches!(b.pool.get(f.return_type), TypeData::Pointer(_))
    }) else {
        return ElementIndex::NONE;
    };
    let Ok(deleter) = pick(b, subject, "delete-function", prop.deleter.as_deref(), strct, scope, |_, f| {
        takes_args(f, num_args)
    }) else {
        return ElementIndex::NONE;
    };
    let Ok(inserter) = pick(b, subject, "insert-function", prop.inserter.as_deref(), strct, scope, |_, f| {
        f.params.len() == 2
    }) else {
        return ElementIndex::NONE;
    };
    let Ok(get_key) = pick(b, subject, "get-key-function", prop.get_key.as_deref(), strct, scope, |_, _| true)
    else {
        return ElementIndex::NONE;
    };
    let Ok(clear) = pick(b, subject, "clear-function", prop.clear.as_deref(), strct, scope, |_, f| {
        takes_args(f, 0)
    }) else {
        return ElementIndex::NONE;
    };
    let Ok(setter) = pick(b, subject, "setter", prop.setter.as_deref(), strct, scope, |_, _| true) else {
        return ElementIndex::NONE;
    };

    if index.is_none() {
        index = b.db.next_index();
        tracing::debug!(%index, name = %property_name, "new property");
        b.db.add_element(
            index,
            InterrogateElement {
                name: prop.name.clone(),
                scoped_name: descope(&property_name).to_owned(),
                ..InterrogateElement::default()
            },
        );
    }
    b.properties_by_name
        .insert(property_name.clone(), (index, prop.clone()));

    let (getter_index, element_type, getter_comment) = match getter {
        Some((inst, ftype)) => {
            let getter_index = b.get_function(&inst, Some(strct), scope, FunctionFlags::empty());
            let value = b.pool.unwrap_reference(ftype.return_type);
            (getter_index, b.get_type(value, false), inst.comment)
        }
        None => (FunctionIndex::NONE, TypeIndex::NONE, None),
    };
    let previous_type = b.db.get_element(index).ty;
    if previous_type.is_some() && element_type.is_some() && previous_type != element_type {
        b.diagnose(subject, "property has inconsistent element type");
    }

    let record = b.db.update_element(index);
    record.flags |= ElementFlags::PROPERTY;
    if element_type.is_some() {
        record.ty = element_type;
    }
    match prop.kind {
        PropertyKind::Normal => {}
        PropertyKind::Sequence => record.flags |= ElementFlags::SEQUENCE,
        PropertyKind::Mapping => record.flags |= ElementFlags::MAPPING,
    }
    if keyed {
        record.length_function = length.map_or(FunctionIndex::NONE, |(_, index)| index);
    }
    if getter_index.is_some() {
        record.flags |= ElementFlags::HAS_GETTER;
        record.getter = getter_index;
    }
    for (found, flag, slot) in [
        (&hasser, ElementFlags::HAS_HAS_FUNCTION, &mut record.has_function),
        (&deleter, ElementFlags::HAS_DEL_FUNCTION, &mut record.del_function),
        (&inserter, ElementFlags::HAS_INSERT_FUNCTION, &mut record.insert_function),
        (&get_key, ElementFlags::HAS_GETKEY_FUNCTION, &mut record.getkey_function),
        (&clear, ElementFlags::HAS_CLEAR_FUNCTION, &mut record.clear_function),
    ] {
        if let Some((_, function)) = found {
            record.flags |= flag;
            *slot = *function;
        }
    }
    if let Some((_, function)) = setter {
        record.flags |= ElementFlags::HAS_SETTER;
        record.setter = function;
    }
    if let Some(comment) = prop.comment.as_deref().or(getter_comment.as_deref()) {
        record.comment = trim_blanks(comment).to_owned();
    }
    index
}

pub(super) fn get_make_seq(
    b: &mut InterrogateBuilder,
    seq: &MakeSeq,
    strct: StructId,
    scope: ScopeId,
) -> MakeSeqIndex {
    let seq_name = b.pool.qualify(scope, &seq.name);
    if let Some(&known) = b.make_seqs_by_name.get(&seq_name) {
        return known;
    }
    let subject = seq_name.as_str();

    if seq.length_getter.is_empty() {
        b.diagnose(subject, "MAKE_SEQ requires a length method");
        return MakeSeqIndex::NONE;
    }
    if seq.element_getter.is_empty() {
        b.diagnose(subject, "MAKE_SEQ requires an element method");
        return MakeSeqIndex::NONE;
    }
    let Ok(Some((_, length_getter))) = pick(
        b,
        subject,
        "length method",
        Some(seq.length_getter.as_str()),
        strct,
        scope,
        |_, _| true,
    ) else {
        return MakeSeqIndex::NONE;
    };
    let Ok(Some((_, element_getter))) = pick(
        b,
        subject,
        "element method",
        Some(seq.element_getter.as_str()),
        strct,
        scope,
        |b, f| f.params.params.first().is_some_and(|p| b.pool.is_integer(p.ty)),
    ) else {
        return MakeSeqIndex::NONE;
    };

    let index = b.db.next_index();
    tracing::debug!(%index, name = %seq_name, "new make_seq");
    b.make_seqs_by_name.insert(seq_name.clone(), index);
    b.db.add_make_seq(
        index,
        InterrogateMakeSeq {
            name: seq.name.clone(),
            scoped_name: descope(&seq_name).to_owned(),
            comment: seq
                .comment
                .as_deref()
                .map(trim_blanks)
                .unwrap_or_default()
                .to_owned(),
            length_getter,
            element_getter,
        },
    );
    index
}
