//! Emission of `tagged` (single-constructor) types.

use taggen_codegen::{CodeFragment, ConstructorInfo, Renderable};
use taggen_schema::FieldMap;

use super::fields::{constructor_body, from_call, to_string_return};
use crate::{
    ast::{ArrowFn, Const, Fn, JsObject},
    naming::js_string,
};

/// Sections for a tagged type: prototype, constructor, statics.
pub fn emit_tagged(constructor: &ConstructorInfo, fields: &FieldMap) -> Vec<Vec<CodeFragment>> {
    let name = constructor.name.as_str();
    let prototype = format!("{}Prototype", name);

    vec![
        prototype_const(constructor, &prototype).to_fragments(),
        Fn::new(name)
            .params(&constructor.fields)
            .body(constructor_body(constructor, fields, &prototype))
            .to_fragments(),
        statics(constructor, fields, &prototype),
    ]
}

fn prototype_const(constructor: &ConstructorInfo, prototype: &str) -> Const {
    let name = constructor.name.as_str();
    let descriptors = JsObject::new()
        .descriptor("@@typeName", CodeFragment::line(js_string(name)))
        .descriptor(
            "toString",
            Fn::anonymous().body_line(to_string_return(constructor)),
        )
        .descriptor("toJSON", Fn::anonymous().body_line("return this"))
        .descriptor("constructor", CodeFragment::line(name));
    Const::new(
        prototype,
        descriptors.wrapped("Object.create(Object.prototype, ", ")"),
    )
}

fn statics(constructor: &ConstructorInfo, fields: &FieldMap, prototype: &str) -> Vec<CodeFragment> {
    let name = constructor.name.as_str();
    let statics = [
        Const::assign(format!("{}.prototype", name), CodeFragment::line(prototype)),
        Const::assign(
            format!("{}.toString", name),
            ArrowFn::expr(&[], js_string(name)),
        ),
        Const::assign(
            format!("{}.is", name),
            ArrowFn::expr(
                &["v"],
                format!("v != null && v['@@typeName'] === {}", js_string(name)),
            ),
        ),
        Const::assign(
            format!("{}._from", name),
            ArrowFn::expr(&["o"], from_call(constructor, fields)),
        ),
        Const::assign(
            format!("{}.from", name),
            CodeFragment::line(format!("{}._from", name)),
        ),
    ];
    statics.iter().flat_map(Renderable::to_fragments).collect()
}
