//! Module-local helper functions emitted ahead of the type definitions.
//!
//! Generated modules carry no dependencies, so each one declares the
//! validators it calls. Only the helpers a type needs are emitted.

use taggen_codegen::{Check, CodeFragment, Renderable, TypeAnalysis};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Helper {
    ToString,
    Fail,
    ArgumentCount,
    String,
    Number,
    Boolean,
    Object,
    Regex,
    Tag,
    Array,
    Hydrate,
}

impl Helper {
    /// Name the helper is declared under.
    pub fn name(self) -> &'static str {
        match self {
            Helper::ToString => "_toString",
            Helper::Fail => "_fail",
            Helper::ArgumentCount => "validateArgumentCount",
            Helper::String => "validateString",
            Helper::Number => "validateNumber",
            Helper::Boolean => "validateBoolean",
            Helper::Object => "validateObject",
            Helper::Regex => "validateRegex",
            Helper::Tag => "validateTag",
            Helper::Array => "validateArray",
            Helper::Hydrate => "_hydrate",
        }
    }

    /// The validator a field check calls.
    pub fn for_check(check: Check) -> Self {
        match check {
            Check::String => Helper::String,
            Check::Number => Helper::Number,
            Check::Boolean => Helper::Boolean,
            Check::Object => Helper::Object,
            Check::Pattern => Helper::Regex,
            Check::Tag => Helper::Tag,
            Check::Array => Helper::Array,
        }
    }

    fn source(self) -> &'static str {
        match self {
            Helper::ToString => TO_STRING,
            Helper::Fail => FAIL,
            Helper::ArgumentCount => ARGUMENT_COUNT,
            Helper::String => VALIDATE_STRING,
            Helper::Number => VALIDATE_NUMBER,
            Helper::Boolean => VALIDATE_BOOLEAN,
            Helper::Object => VALIDATE_OBJECT,
            Helper::Regex => VALIDATE_REGEX,
            Helper::Tag => VALIDATE_TAG,
            Helper::Array => VALIDATE_ARRAY,
            Helper::Hydrate => HYDRATE,
        }
    }
}

impl Renderable for Helper {
    /// Helper sources are written with four-space indentation; each level
    /// becomes one builder indent so the configured indent applies.
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.source()
            .lines()
            .map(|line| {
                let text = line.trim_start_matches(' ');
                let depth = (line.len() - text.len()) / 4;
                (0..depth).fold(CodeFragment::line(text), |fragment, _| {
                    CodeFragment::indent(vec![fragment])
                })
            })
            .collect()
    }
}

/// The helpers a type's module declares, in declaration order.
pub fn helpers_for(analysis: &TypeAnalysis) -> Vec<Helper> {
    let mut helpers = Vec::new();
    let renders_fields = analysis.is_sum || analysis.constructors.iter().any(|c| !c.is_unit());
    if renders_fields {
        helpers.push(Helper::ToString);
    }
    if !analysis.checks.is_empty() {
        helpers.push(Helper::Fail);
    }
    if analysis.checks_arity() {
        helpers.push(Helper::ArgumentCount);
    }
    helpers.extend(analysis.checks.iter().map(|check| Helper::for_check(*check)));
    if analysis.hydrates {
        helpers.push(Helper::Hydrate);
    }
    helpers
}

const TO_STRING: &str = r#"const _toString = value => {
    if (value === undefined) return 'undefined'
    if (value === null) return 'null'
    if (typeof value === 'string') return JSON.stringify(value)
    if (Array.isArray(value)) return `[${value.map(_toString).join(', ')}]`
    if (typeof value === 'object') {
        if (typeof value.toString === 'function' && value.toString !== Object.prototype.toString) return value.toString()
        return `{${Object.entries(value).map(([k, v]) => `${k}: ${_toString(v)}`).join(', ')}}`
    }
    return String(value)
}"#;

const FAIL: &str = r#"const _fail = (constructorName, field, expected, value) => {
    throw new TypeError(`In constructor ${constructorName}: expected ${field} to ${expected}; found ${_toString(value)}`)
}"#;

const ARGUMENT_COUNT: &str = r#"const validateArgumentCount = (constructorName, expected, args) => {
    if (args.length !== expected) {
        throw new TypeError(`In constructor ${constructorName}: expected ${expected} arguments, found ${args.length}`)
    }
}"#;

const VALIDATE_STRING: &str = r#"const validateString = (constructorName, field, optional, value) => {
    if (optional && value == null) return
    if (typeof value !== 'string') _fail(constructorName, field, 'have type String', value)
}"#;

const VALIDATE_NUMBER: &str = r#"const validateNumber = (constructorName, field, optional, value) => {
    if (optional && value == null) return
    if (typeof value !== 'number') _fail(constructorName, field, 'have type Number', value)
}"#;

const VALIDATE_BOOLEAN: &str = r#"const validateBoolean = (constructorName, field, optional, value) => {
    if (optional && value == null) return
    if (typeof value !== 'boolean') _fail(constructorName, field, 'have type Boolean', value)
}"#;

const VALIDATE_OBJECT: &str = r#"const validateObject = (constructorName, field, optional, value) => {
    if (optional && value == null) return
    if (typeof value !== 'object' || value === null) _fail(constructorName, field, 'have type Object', value)
}"#;

const VALIDATE_REGEX: &str = r#"const validateRegex = (constructorName, field, optional, regex, value) => {
    if (optional && value == null) return
    if (typeof value !== 'string' || value.match(regex) === null) _fail(constructorName, field, `match ${regex}`, value)
}"#;

const VALIDATE_TAG: &str = r#"const validateTag = (constructorName, field, optional, Type, value) => {
    if (optional && value == null) return
    if (!Type.is(value)) _fail(constructorName, field, `have type ${Type}`, value)
}"#;

const VALIDATE_ARRAY: &str = r#"const validateArray = (constructorName, field, optional, depth, leaf, value) => {
    if (optional && value == null) return
    const matchesLeaf = v => {
        if (leaf === 'String') return typeof v === 'string'
        if (leaf === 'Number') return typeof v === 'number'
        if (leaf === 'Boolean') return typeof v === 'boolean'
        if (leaf === 'Object') return typeof v === 'object' && v !== null
        if (leaf === 'Any') return true
        return leaf.is(v)
    }
    const matches = (v, d) => (d === 0 ? matchesLeaf(v) : Array.isArray(v) && v.every(item => matches(item, d - 1)))
    if (!matches(value, depth)) {
        _fail(constructorName, field, `have type ${'['.repeat(depth)}${leaf}${']'.repeat(depth)}`, value)
    }
}"#;

const HYDRATE: &str = r#"const _hydrate = (Type, depth, value) => {
    if (value == null || typeof value !== 'object') return value
    if (depth > 0) return Array.isArray(value) ? value.map(v => _hydrate(Type, depth - 1, v)) : value
    return Type.is(value) ? value : Type.from(value)
}"#;
