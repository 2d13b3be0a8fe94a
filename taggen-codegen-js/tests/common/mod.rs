#![allow(dead_code)]

use std::path::Path;

use taggen_codegen::pipeline::Pipeline;
use taggen_codegen_js::Generator;
use taggen_core::Config;
use taggen_schema::parse_str_with_filename;

pub const COORD: &str = "\
export const Coord = {
    kind: 'tagged',
    fields: { x: 'Number', y: 'Number' },
}

Coord.add = (a, b) => Coord(a.x + b.x, a.y + b.y)
";

pub const SHAPE: &str = "\
import { Coord } from './coord.type.js'

export const Shape = {
    kind: 'taggedSum',
    variants: {
        Square: { topLeft: 'Coord', bottomRight: 'Coord' },
        Circle: { centre: 'Coord', radius: 'Number' },
        Path: { points: '[[Coord]]' },
        Empty: {},
    },
}
";

pub const HAS_ID: &str = "\
export const HasId = {
    kind: 'tagged',
    fields: { id: /^[a-z]+-[0-9]+$/, label: 'String?' },
}
";

pub const GRID: &str = "\
export const Grid = {
    kind: 'tagged',
    fields: { cells: '[[Number]]', deep: '[[[Number]]]?' },
}
";

pub const LISTS: &str = "\
import { Coord } from './coord.type.js'

export const Lists = {
    kind: 'tagged',
    fields: { numbers: '[Number]', coords: '[Coord]', cube: '[[[Coord]]]?' },
}
";

/// The attached function's template literal depends on its trailing spaces
/// and blank lines.
pub const DOC: &str = "export const Doc = {\n    kind: 'tagged',\n    fields: { body: 'String' },\n}\n\nDoc.render = d => `header   \n\n\n\n${d.body}  `\n";

/// Compile definition source named `file_name` into module text.
pub fn compile_with(src: &str, file_name: &str, config: &Config) -> String {
    let parsed = parse_str_with_filename(src, file_name, &config.imports).unwrap();
    let definition = parsed.validate().unwrap();
    let ctx = Pipeline::new().run(parsed, definition).unwrap();
    let output = file_name.replace(".type.js", ".js");
    Generator::from_context(&ctx, config, output)
        .unwrap()
        .contents()
}

pub fn compile(src: &str, file_name: &str) -> String {
    compile_with(src, file_name, &Config::default())
}

/// Generate every fixture into `dir` as `<kebab>.js`.
pub fn write_fixtures(dir: &Path) -> std::io::Result<()> {
    for (src, name) in [
        (COORD, "coord"),
        (SHAPE, "shape"),
        (HAS_ID, "has-id"),
        (GRID, "grid"),
        (LISTS, "lists"),
        (DOC, "doc"),
    ] {
        let module = compile(src, &format!("{}.type.js", name));
        std::fs::write(dir.join(format!("{}.js", name)), module)?;
    }
    Ok(())
}
