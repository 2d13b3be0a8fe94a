//! Emission of `taggedSum` types: a type object, a shared prototype with
//! `match`, and one constructor or singleton per variant.

use taggen_codegen::{CodeFragment, ConstructorInfo, Renderable, TypeAnalysis};
use taggen_schema::FieldMap;

use super::fields::{constructor_body, from_call, to_string_return};
use crate::{
    ast::{ArrowFn, Const, Fn, JsObject, suffixed},
    naming::js_string,
    runtime::Helper,
};

pub fn emit_tagged_sum<'a>(
    analysis: &TypeAnalysis,
    variants: impl IntoIterator<Item = (&'a ConstructorInfo, &'a FieldMap)>,
    firestore: bool,
) -> Vec<Vec<CodeFragment>> {
    let name = analysis.type_name.as_str();
    let prototype = format!("{}Prototype", name);

    let mut sections = vec![
        type_object(analysis).to_fragments(),
        hidden_properties(analysis),
        shared_prototype(name, &prototype).to_fragments(),
    ];
    for (constructor, fields) in variants {
        sections.push(if constructor.is_unit() {
            unit_variant(constructor, &prototype).to_fragments()
        } else {
            variant(name, constructor, fields, &prototype)
        });
    }
    if firestore {
        sections.push(firestore_dispatch(name));
    }
    sections
}

fn type_object(analysis: &TypeAnalysis) -> Const {
    let name = analysis.type_name.as_str();
    let is = analysis
        .constructors
        .iter()
        .map(|c| format!("{}.is(v)", c.qualified_name))
        .collect::<Vec<_>>()
        .join(" || ");

    let from = ArrowFn::block(&["o"])
        .body_line("const tagName = o == null ? undefined : o['@@tagName']")
        .body_line(format!(
            "if (!{}['@@tagNames'].includes(tagName)) throw new TypeError(`{}.from: unknown @@tagName ${{{}(tagName)}}`)",
            name,
            name,
            Helper::ToString.name()
        ))
        .body_line(format!("return {}[tagName].from(o)", name));

    Const::new(
        name,
        JsObject::new()
            .property("toString", ArrowFn::expr(&[], js_string(name)))
            .property("is", ArrowFn::expr(&["v"], is))
            .property("from", from),
    )
}

/// Non-enumerable `@@typeName` and `@@tagNames` on the type object.
fn hidden_properties(analysis: &TypeAnalysis) -> Vec<CodeFragment> {
    let name = analysis.type_name.as_str();
    let tag_names = analysis
        .constructors
        .iter()
        .map(|c| js_string(&c.name))
        .collect::<Vec<_>>()
        .join(", ");
    vec![
        CodeFragment::line(format!(
            "Object.defineProperty({}, '@@typeName', {{ value: {} }})",
            name,
            js_string(name)
        )),
        CodeFragment::line(format!(
            "Object.defineProperty({}, '@@tagNames', {{ value: [{}] }})",
            name, tag_names
        )),
    ]
}

fn shared_prototype(name: &str, prototype: &str) -> Const {
    let match_fn = Fn::anonymous()
        .param("variants")
        .body_line(format!(
            "const missing = {}['@@tagNames'].find(tagName => typeof variants[tagName] !== 'function')",
            name
        ))
        .body_line(
            "if (missing !== undefined) throw new TypeError(`Constructors given to match didn't include: ${missing}`)",
        )
        .body_line("return variants[this['@@tagName']](this)");

    let descriptors = JsObject::new()
        .descriptor("@@typeName", CodeFragment::line(js_string(name)))
        .descriptor("match", match_fn)
        .descriptor("constructor", CodeFragment::line(name));
    Const::new(
        prototype,
        descriptors.wrapped("Object.create(Object.prototype, ", ")"),
    )
}

/// A variant with fields: validating constructor, its prototype, statics.
fn variant(
    type_name: &str,
    constructor: &ConstructorInfo,
    fields: &FieldMap,
    shared: &str,
) -> Vec<CodeFragment> {
    let qualified = constructor.qualified_name.as_str();
    let variant_prototype = format!("{}.prototype", qualified);

    let function = Fn::anonymous()
        .params(&constructor.fields)
        .body(constructor_body(constructor, fields, &variant_prototype));

    let descriptors = JsObject::new()
        .descriptor("@@tagName", CodeFragment::line(js_string(&constructor.name)))
        .descriptor(
            "toString",
            Fn::anonymous().body_line(to_string_return(constructor)),
        )
        .descriptor(
            "toJSON",
            Fn::anonymous().body_line("return Object.assign({ '@@tagName': this['@@tagName'] }, this)"),
        )
        .descriptor("constructor", CodeFragment::line(qualified));

    let statics = [
        Const::assign(
            format!("{}.toString", qualified),
            ArrowFn::expr(&[], js_string(qualified)),
        ),
        Const::assign(
            format!("{}.is", qualified),
            ArrowFn::expr(
                &["v"],
                format!(
                    "v != null && v['@@typeName'] === {} && v['@@tagName'] === {}",
                    js_string(type_name),
                    js_string(&constructor.name)
                ),
            ),
        ),
        Const::assign(
            format!("{}._from", qualified),
            ArrowFn::expr(&["o"], from_call(constructor, fields)),
        ),
        Const::assign(
            format!("{}.from", qualified),
            CodeFragment::line(format!("{}._from", qualified)),
        ),
    ];

    let mut fragments = Const::assign(qualified, function).to_fragments();
    fragments.push(CodeFragment::blank());
    fragments.extend(
        Const::assign(
            &variant_prototype,
            descriptors.wrapped(&format!("Object.create({}, ", shared), ")"),
        )
        .to_fragments(),
    );
    fragments.extend(statics.iter().flat_map(Renderable::to_fragments));
    fragments
}

/// A variant without fields: one frozen instance that is its own
/// constructor.
fn unit_variant(constructor: &ConstructorInfo, shared: &str) -> Const {
    let qualified = constructor.qualified_name.as_str();
    let tag = js_string(&constructor.name);

    let descriptors = JsObject::new()
        .descriptor("@@tagName", CodeFragment::line(tag.clone()))
        .descriptor("toString", ArrowFn::expr(&[], js_string(qualified)))
        .descriptor(
            "toJSON",
            ArrowFn::expr(&[], format!("({{ '@@tagName': {} }})", tag)),
        )
        .descriptor("is", ArrowFn::expr(&["v"], format!("v === {}", qualified)))
        .descriptor("_from", ArrowFn::expr(&[], qualified))
        .descriptor("from", ArrowFn::expr(&[], qualified));

    let instance = descriptors.wrapped(&format!("Object.create({}, ", shared), ")");
    Const::assign(
        qualified,
        CodeFragment::braced(
            "Object.freeze(",
            suffixed(instance, ","),
            ")",
        ),
    )
}

/// Tag-driven `_toFirestore`/`_fromFirestore`, deferring to a variant's own
/// hook when it has one.
fn firestore_dispatch(name: &str) -> Vec<CodeFragment> {
    let check_tag = |hook: &str| {
        format!(
            "if (!{}['@@tagNames'].includes(tagName)) throw new TypeError(`{}.{}: unknown @@tagName ${{{}(tagName)}}`)",
            name,
            name,
            hook,
            Helper::ToString.name()
        )
    };

    let to_firestore = ArrowFn::block(&["o", "encodeTimestamps"])
        .body_line("const tagName = o['@@tagName']")
        .body_line(check_tag("_toFirestore"))
        .body_line(format!("const variant = {}[tagName]", name))
        .body_line("if (typeof variant._toFirestore === 'function') return variant._toFirestore(o, encodeTimestamps)")
        .body_line("return Object.assign({ '@@tagName': tagName }, o)");

    let from_firestore = ArrowFn::block(&["o", "decodeTimestamps"])
        .body_line("const tagName = o['@@tagName']")
        .body_line(check_tag("_fromFirestore"))
        .body_line(format!("const variant = {}[tagName]", name))
        .body_line("if (typeof variant._fromFirestore === 'function') return variant._fromFirestore(o, decodeTimestamps)")
        .body_line("return variant.from(o)");

    let mut fragments = Const::assign(format!("{}._toFirestore", name), to_firestore).to_fragments();
    fragments.push(CodeFragment::blank());
    fragments.extend(Const::assign(format!("{}._fromFirestore", name), from_firestore).to_fragments());
    fragments
}
