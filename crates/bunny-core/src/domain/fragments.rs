//! Code fragments derived from field lists.
//!
//! Each function turns a slice of [`FieldDefinition`]s into the text a stub
//! token expects. Indentation matches the generated PHP class bodies: array
//! entries sit at twelve spaces, closing brackets at eight.

use crate::domain::field::FieldDefinition;
use crate::domain::naming;

const ENTRY_INDENT: &str = "\n            ";
const CLOSE_INDENT: &str = "\n        ";

/// Column types that get an Eloquent cast.
pub const CASTABLE_TYPES: &[&str] = &[
    "boolean", "integer", "float", "array", "json", "date", "datetime",
];

fn bracketed(entries: &[String]) -> String {
    format!("[{ENTRY_INDENT}{}{CLOSE_INDENT}]", entries.join(&format!(",{ENTRY_INDENT}")))
}

/// `'title', 'price'` for the common model stub.
pub fn fillable_inline(fields: &[FieldDefinition]) -> String {
    fields
        .iter()
        .map(|f| format!("'{}'", f.name))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Multi-line `$fillable` array for the backend model stub.
pub fn fillable(fields: &[FieldDefinition]) -> String {
    let entries: Vec<String> = fields.iter().map(|f| format!("'{}'", f.name)).collect();
    bracketed(&entries)
}

/// `$casts` array; `[]` when no field has a castable type.
pub fn casts(fields: &[FieldDefinition]) -> String {
    let entries: Vec<String> = fields
        .iter()
        .filter(|f| CASTABLE_TYPES.contains(&f.column_type.as_str()))
        .map(|f| format!("'{}' => '{}'", f.name, f.column_type))
        .collect();

    if entries.is_empty() {
        "[]".to_owned()
    } else {
        bracketed(&entries)
    }
}

/// One schema-builder line per field.
pub fn migration_column(field: &FieldDefinition) -> String {
    let mut line = format!("$table->{}('{}')", field.column_type, field.name);
    if field.is_unique() {
        line.push_str("->unique()");
    }
    if field.is_nullable() {
        line.push_str("->nullable()");
    }
    if let Some(default) = field.default_value() {
        line.push_str(&format!("->default('{default}')"));
    }
    line.push(';');
    line
}

/// All columns, joined for placement inside a `Schema::create` closure.
pub fn migration_columns(fields: &[FieldDefinition]) -> String {
    fields
        .iter()
        .map(migration_column)
        .collect::<Vec<_>>()
        .join(ENTRY_INDENT)
}

fn faker_for(column_type: &str) -> &'static str {
    match column_type {
        "text" | "longText" | "mediumText" => "$this->faker->paragraph()",
        "integer" | "bigInteger" | "smallInteger" | "unsignedInteger" => {
            "$this->faker->randomNumber()"
        }
        "decimal" | "float" | "double" => "$this->faker->randomFloat(2, 0, 1000)",
        "boolean" => "$this->faker->boolean()",
        "date" => "$this->faker->date()",
        "datetime" | "timestamp" => "$this->faker->dateTime()",
        "email" => "$this->faker->safeEmail()",
        _ => "$this->faker->word()",
    }
}

/// Factory `definition()` entries, one per field.
pub fn factory_fields(fields: &[FieldDefinition]) -> String {
    fields
        .iter()
        .map(|f| format!("'{}' => {},", f.name, faker_for(&f.column_type)))
        .collect::<Vec<_>>()
        .join(ENTRY_INDENT)
}

fn input_type(column_type: &str) -> &'static str {
    match column_type {
        "integer" | "bigInteger" | "smallInteger" | "decimal" | "float" | "double" => "number",
        "boolean" => "checkbox",
        "date" => "date",
        "datetime" | "timestamp" => "datetime-local",
        "email" => "email",
        _ => "text",
    }
}

/// Bootstrap-style form groups for the create/edit views.
pub fn form_fields(fields: &[FieldDefinition]) -> String {
    fields
        .iter()
        .map(|f| {
            let label = naming::ucfirst(&f.name.replace('_', " "));
            let required = if f.is_nullable() { "" } else { " required" };
            let control = if f.column_type == "text" {
                format!(
                    "<textarea class=\"form-control\" id=\"{name}\" name=\"{name}\"{required}></textarea>",
                    name = f.name
                )
            } else {
                format!(
                    "<input type=\"{ty}\" class=\"form-control\" id=\"{name}\" name=\"{name}\"{required}>",
                    ty = input_type(&f.column_type),
                    name = f.name
                )
            };
            format!(
                "<div class=\"mb-3\">\n    <label for=\"{name}\" class=\"form-label\">{label}</label>\n    {control}\n</div>",
                name = f.name
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validation rules array for a form request.
///
/// `required` unless nullable, a type rule for email/integer/float/date,
/// `min:`/`max:` when given, and `unique:<table>` for unique fields.
pub fn validation_rules(fields: &[FieldDefinition], table: &str) -> String {
    let entries: Vec<String> = fields
        .iter()
        .map(|f| {
            let mut rules: Vec<String> = Vec::new();
            rules.push(if f.is_nullable() { "nullable" } else { "required" }.to_owned());
            match f.column_type.as_str() {
                "email" => rules.push("email".into()),
                "integer" => rules.push("integer".into()),
                "float" | "decimal" => rules.push("numeric".into()),
                "date" | "datetime" => rules.push("date".into()),
                "boolean" => rules.push("boolean".into()),
                _ => {}
            }
            if let Some(min) = f.min() {
                rules.push(format!("min:{min}"));
            }
            if let Some(max) = f.max() {
                rules.push(format!("max:{max}"));
            }
            if f.is_unique() {
                rules.push(format!("unique:{table},{}", f.name));
            }
            format!("'{}' => ['{}']", f.name, rules.join("', '"))
        })
        .collect();
    bracketed(&entries)
}

/// `'name' => $this->name,` lines for an API resource.
pub fn resource_fields(fields: &[FieldDefinition]) -> String {
    fields
        .iter()
        .map(|f| format!("'{0}' => $this->{0},", f.name))
        .collect::<Vec<_>>()
        .join(ENTRY_INDENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::parse_fields_strict;

    fn fields(spec: &str) -> Vec<FieldDefinition> {
        parse_fields_strict(spec).unwrap()
    }

    #[test]
    fn fillable_formats() {
        let f = fields("title:string,price:decimal");
        assert_eq!(fillable_inline(&f), "'title', 'price'");
        assert_eq!(
            fillable(&f),
            "[\n            'title',\n            'price'\n        ]"
        );
    }

    #[test]
    fn casts_only_for_castable_types() {
        assert_eq!(casts(&fields("title:string")), "[]");
        assert_eq!(
            casts(&fields("title:string,active:boolean")),
            "[\n            'active' => 'boolean'\n        ]"
        );
    }

    #[test]
    fn migration_column_modifiers_in_order() {
        let f = fields("email:string:nullable:unique:default=none");
        assert_eq!(
            migration_column(&f[0]),
            "$table->string('email')->unique()->nullable()->default('none');"
        );
        assert_eq!(
            migration_columns(&fields("a:string,b:integer")),
            "$table->string('a');\n            $table->integer('b');"
        );
    }

    #[test]
    fn validation_rules_cover_types_and_constraints() {
        let rules = validation_rules(
            &fields("email:email:unique,age:integer:nullable:min=18,bio:text:max=500"),
            "members",
        );
        assert!(rules.contains("'email' => ['required', 'email', 'unique:members,email']"));
        assert!(rules.contains("'age' => ['nullable', 'integer', 'min:18']"));
        assert!(rules.contains("'bio' => ['required', 'max:500']"));
    }

    #[test]
    fn resource_and_factory_fields() {
        let f = fields("title:string,views:integer");
        assert_eq!(
            resource_fields(&f),
            "'title' => $this->title,\n            'views' => $this->views,"
        );
        let factory = factory_fields(&f);
        assert!(factory.contains("'title' => $this->faker->word(),"));
        assert!(factory.contains("'views' => $this->faker->randomNumber(),"));
    }

    #[test]
    fn form_fields_mark_required_inputs() {
        let html = form_fields(&fields("first_name:string,note:text:nullable"));
        assert!(
            html.contains("<label for=\"first_name\" class=\"form-label\">First name</label>")
        );
        assert!(html.contains(
            "type=\"text\" class=\"form-control\" id=\"first_name\" name=\"first_name\" required>"
        ));
        assert!(
            html.contains("<textarea class=\"form-control\" id=\"note\" name=\"note\"></textarea>")
        );
    }

    #[test]
    fn empty_field_lists() {
        assert_eq!(fillable_inline(&[]), "");
        assert_eq!(casts(&[]), "[]");
        assert_eq!(migration_columns(&[]), "");
    }
}
