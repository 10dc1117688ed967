//! Widget instances: design-system components mapped onto the widget library.
//!
//! Each widget reads its properties by key prefix (see [`Properties`]) and renders a
//! single library component. Widgets with mutable state also declare a script
//! variable named after the node id.

use super::{Context, ParsedCode, Properties};
use crate::datetime::{date_time_to_iso, date_to_iso, time_to_iso};
use crate::markup::{escape_attribute, escape_text};
use crate::naming::{create_slug, state_identifier};
use crate::scene::{InstanceNode, SceneNode};
use crate::style::js_number;

const CHIP_COMPONENT: &str = "Chip";
const TAB_ITEM_COMPONENT: &str = "_TabItem";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Button,
    Checkbox,
    Radio,
    Switch,
    TextInput,
    NumberInput,
    DateInput,
    TimeInput,
    DateTimeInput,
    Select,
    FormLabel,
    FormHelpMessage,
    Textarea,
    Tabs,
    Avatar,
    Spinner,
    Chip,
}

impl Widget {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "Button" => Widget::Button,
            "Checkbox" => Widget::Checkbox,
            "Radio" => Widget::Radio,
            "Switch" => Widget::Switch,
            "Text Input" => Widget::TextInput,
            "Number Input" => Widget::NumberInput,
            "Date Input" => Widget::DateInput,
            "Time Input" => Widget::TimeInput,
            "DateTime Input" => Widget::DateTimeInput,
            "Select" => Widget::Select,
            "Form Label" => Widget::FormLabel,
            "Form Help Message" => Widget::FormHelpMessage,
            "Textarea" => Widget::Textarea,
            "Tabs" => Widget::Tabs,
            "Avatar" => Widget::Avatar,
            "Spinner" => Widget::Spinner,
            "Chip" => Widget::Chip,
            _ => return None,
        })
    }

    /// Library export(s) the widget renders with.
    pub fn imports(self) -> &'static [&'static str] {
        match self {
            Widget::Button => &["Button"],
            Widget::Checkbox => &["Checkbox"],
            Widget::Radio => &["Radio"],
            Widget::Switch => &["Switch"],
            Widget::TextInput => &["TextInput"],
            Widget::NumberInput => &["NumberInput"],
            Widget::DateInput => &["DateInput"],
            Widget::TimeInput => &["TimeInput"],
            Widget::DateTimeInput => &["DateTimeInput"],
            Widget::Select => &["Select"],
            Widget::FormLabel => &["FormLabel"],
            Widget::FormHelpMessage => &["FormHelpMsg"],
            Widget::Textarea => &["Textarea"],
            Widget::Tabs => &["Tabs", "TabItem"],
            Widget::Avatar => &["Avatar"],
            Widget::Spinner => &["Spinner"],
            Widget::Chip => &["Chip"],
        }
    }
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn toggle(name: &'static str, on: bool) -> &'static str {
    if on {
        name
    } else {
        ""
    }
}

/// Optional label, shown only when the `showLabel` toggle is on.
fn shown_label(props: &Properties<'_>) -> String {
    if props.flag("showLabel") {
        props.text("label")
    } else {
        String::new()
    }
}

fn js_string(text: &str) -> String {
    serde_json::Value::from(text).to_string()
}

/// Number input values are emitted as a script expression.
fn number_literal(text: &str) -> String {
    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => js_number(value),
        _ => "null".to_string(),
    }
}

fn select_options(node: &InstanceNode) -> Vec<String> {
    node.exposed_instances
        .iter()
        .filter(|child| child.is_instance_named(CHIP_COMPONENT))
        .filter_map(SceneNode::as_instance)
        .map(|chip| Properties::new(&chip.component_properties).text("label"))
        .collect()
}

fn tab_items(node: &InstanceNode) -> String {
    node.children
        .iter()
        .filter(|child| child.is_instance_named(TAB_ITEM_COMPONENT) && child.is_visible())
        .filter_map(SceneNode::as_instance)
        .map(|item| {
            let props = Properties::new(&item.component_properties);
            let open = if props.flag("active") { " open" } else { "" };
            format!(
                r#"<TabItem title="{}"{}></TabItem>"#,
                escape_attribute(&props.text("name")),
                open
            )
        })
        .collect()
}

pub fn generate(ctx: &Context<'_>, node: &InstanceNode) -> ParsedCode {
    if !node.base.visible {
        return ParsedCode::default();
    }
    let Some(widget) = Widget::from_name(&node.base.name) else {
        tracing::debug!(name = %node.base.name, id = %node.base.id, "no widget template for component");
        return ParsedCode::default();
    };

    let props = Properties::new(&node.component_properties);
    let disabled = bool_attr(props.flag("disabled"));
    let invalid = bool_attr(props.flag("invalid"));
    let mut script = ctx.library_import(widget.imports());

    let markup = match widget {
        Widget::Button => format!(
            r#"<Button disabled={{{}}} variant="{}">{}</Button>"#,
            disabled,
            escape_attribute(&props.text("variant")),
            escape_text(&props.text("label"))
        ),
        Widget::Checkbox => {
            let state = state_identifier("checkbox", &node.base.id);
            script.push_str(&format!(
                "let {}Checked = {};\n",
                state,
                bool_attr(props.flag("checked"))
            ));
            format!(
                "<Checkbox bind:checked={{{}Checked}} disabled={{{}}}>{}</Checkbox>",
                state,
                disabled,
                escape_text(&shown_label(&props))
            )
        }
        Widget::Radio => {
            let label = shown_label(&props);
            format!(
                r#"<Radio disabled={{{}}} value="{}">{}</Radio>"#,
                disabled,
                escape_attribute(&create_slug(&label)),
                escape_text(&label)
            )
        }
        Widget::Switch => {
            let state = state_identifier("switch", &node.base.id);
            script.push_str(&format!(
                "let {}Checked = {};\n",
                state,
                bool_attr(props.flag("checked"))
            ));
            format!(
                r#"<Switch bind:checked={{{}Checked}} size="{}" disabled={{{}}}></Switch>"#,
                state,
                escape_attribute(&props.text("size")),
                disabled
            )
        }
        Widget::TextInput => format!(
            r#"<TextInput disabled={{{}}} invalid={{{}}} value="{}"></TextInput>"#,
            disabled,
            invalid,
            escape_attribute(&props.text("value"))
        ),
        Widget::NumberInput => format!(
            "<NumberInput disabled={{{}}} invalid={{{}}} value={{{}}}></NumberInput>",
            disabled,
            invalid,
            number_literal(&props.text("value"))
        ),
        Widget::DateInput => format!(
            r#"<DateInput disabled={{{}}} invalid={{{}}} value="{}"></DateInput>"#,
            disabled,
            invalid,
            escape_attribute(&date_to_iso(&props.text("value")))
        ),
        Widget::TimeInput => format!(
            r#"<TimeInput disabled={{{}}} invalid={{{}}} value="{}"></TimeInput>"#,
            disabled,
            invalid,
            escape_attribute(&time_to_iso(&props.text("value")))
        ),
        Widget::DateTimeInput => format!(
            r#"<DateTimeInput disabled={{{}}} invalid={{{}}} value="{}"></DateTimeInput>"#,
            disabled,
            invalid,
            escape_attribute(&date_time_to_iso(&props.text("value")))
        ),
        Widget::Select => {
            let state = state_identifier("select", &node.base.id);
            let multiselect = props.flag("multiselect");
            let options: Vec<String> = select_options(node).iter().map(|o| js_string(o)).collect();
            let selected: Vec<String> = if multiselect {
                options.clone()
            } else {
                options.iter().take(1).cloned().collect()
            };
            script.push_str(&format!(
                "let {}Options = [{}];\nlet {}Selected = [{}];\n",
                state,
                options.join(", "),
                state,
                selected.join(", ")
            ));
            format!(
                "<Select disabled={{{}}} invalid={{{}}} maxSelect={{{}}} options={{{}Options}} bind:selected={{{}Selected}}></Select>",
                disabled,
                invalid,
                if multiselect { "null" } else { "1" },
                state,
                state
            )
        }
        Widget::FormLabel => format!(
            "<FormLabel required={{{}}} disabled={{{}}}>{}</FormLabel>",
            bool_attr(props.flag("required")),
            disabled,
            escape_text(&props.text("label"))
        ),
        Widget::FormHelpMessage => format!(
            "<FormHelpMsg invalid={{{}}} disabled={{{}}}>{}</FormHelpMsg>",
            invalid,
            disabled,
            escape_text(&props.text("message"))
        ),
        Widget::Textarea => format!(
            r#"<Textarea resize="vertical" disabled={{{}}} value="{}"></Textarea>"#,
            disabled,
            escape_attribute(&props.text("value"))
        ),
        Widget::Tabs => {
            let background = toggle(" background", props.flag("background"));
            format!("<Tabs{}>{}</Tabs>", background, tab_items(node))
        }
        Widget::Avatar => format!(
            r#"<Avatar size="{}" name="{}"></Avatar>"#,
            escape_attribute(&props.text("size")),
            escape_attribute(&props.text("initial"))
        ),
        Widget::Spinner => format!(
            r#"<Spinner size="{}"{}></Spinner>"#,
            escape_attribute(&props.text("size")),
            toggle(" onbrand", props.flag("onbrand"))
        ),
        Widget::Chip => format!(
            "<Chip disabled={{{}}}{}>{}</Chip>",
            disabled,
            toggle(" dismissible", props.flag("dismissible")),
            escape_text(&props.text("label"))
        ),
    };

    ParsedCode::new(script, markup, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalogs;
    use crate::options::GenerateOptions;
    use serde_json::json;

    fn widget(name: &str, properties: serde_json::Value) -> InstanceNode {
        widget_with(name, properties, json!({}))
    }

    fn widget_with(name: &str, properties: serde_json::Value, extra: serde_json::Value) -> InstanceNode {
        let mut value = json!({
            "type": "INSTANCE", "id": "60:1", "name": name,
            "x": 0, "y": 0, "width": 100, "height": 32,
            "componentProperties": properties
        });
        if let (Some(target), Some(fields)) = (value.as_object_mut(), extra.as_object()) {
            for (key, field) in fields {
                target.insert(key.clone(), field.clone());
            }
        }
        match SceneNode::from_value(value).unwrap() {
            SceneNode::Instance(i) => i,
            other => panic!("unexpected {}", other.kind()),
        }
    }

    fn prop(value: serde_json::Value) -> serde_json::Value {
        json!({ "value": value })
    }

    fn render(node: &InstanceNode) -> ParsedCode {
        let options = GenerateOptions::default();
        generate(&Context::new(Catalogs::builtin(), &options), node)
    }

    #[test]
    fn test_button() {
        let code = render(&widget(
            "Button",
            json!({
                "disabled": prop(json!("false")),
                "variant": prop(json!("primary")),
                "label#3:0": prop(json!("Save & close"))
            }),
        ));
        assert_eq!(code.script, "import { Button } from \"deskblocks\";\n");
        assert_eq!(
            code.markup,
            r#"<Button disabled={false} variant="primary">Save &amp; close</Button>"#
        );
        assert_eq!(code.style, "");
    }

    #[test]
    fn test_checkbox_declares_state() {
        let code = render(&widget(
            "Checkbox",
            json!({
                "checked": prop(json!("true")),
                "disabled": prop(json!(false)),
                "showLabel#1:1": prop(json!(true)),
                "label#1:2": prop(json!("Accept"))
            }),
        ));
        let state = state_identifier("checkbox", "60:1");
        assert!(code.script.ends_with(&format!("let {}Checked = true;\n", state)));
        assert_eq!(
            code.markup,
            format!(
                "<Checkbox bind:checked={{{}Checked}} disabled={{false}}>Accept</Checkbox>",
                state
            )
        );
    }

    #[test]
    fn test_hidden_label_and_missing_properties() {
        let code = render(&widget(
            "Radio",
            json!({ "showLabel": prop(json!(false)), "label": prop(json!("Ignored")) }),
        ));
        assert_eq!(code.markup, r#"<Radio disabled={false} value=""></Radio>"#);

        let code = render(&widget("Checkbox", json!({})));
        assert!(code.markup.contains("disabled={false}></Checkbox>"));
    }

    #[test]
    fn test_radio_value_is_label_slug() {
        let code = render(&widget(
            "Radio",
            json!({
                "disabled": prop(json!("true")),
                "showLabel": prop(json!(true)),
                "label": prop(json!("Option One"))
            }),
        ));
        assert_eq!(
            code.markup,
            r#"<Radio disabled={true} value="optionOne">Option One</Radio>"#
        );
    }

    #[test]
    fn test_switch() {
        let code = render(&widget(
            "Switch",
            json!({ "checked": prop(json!("false")), "size": prop(json!("small")) }),
        ));
        let state = state_identifier("switch", "60:1");
        assert!(code.script.contains(&format!("let {}Checked = false;", state)));
        assert!(code.markup.contains(r#"size="small""#));
    }

    #[test]
    fn test_inputs() {
        let text = render(&widget(
            "Text Input",
            json!({ "invalid": prop(json!("true")), "value#1:0": prop(json!("a \"b\"")) }),
        ));
        assert_eq!(
            text.markup,
            r#"<TextInput disabled={false} invalid={true} value="a &quot;b&quot;"></TextInput>"#
        );

        let number = render(&widget("Number Input", json!({ "value": prop(json!("42")) })));
        assert!(number.markup.contains("value={42}"));
        let number = render(&widget("Number Input", json!({ "value": prop(json!("n/a")) })));
        assert!(number.markup.contains("value={null}"));

        let date = render(&widget("Date Input", json!({ "value": prop(json!("1/1/2023")) })));
        assert!(date.markup.contains(r#"value="2023-01-01""#));
        let time = render(&widget("Time Input", json!({ "value": prop(json!("3:45 PM")) })));
        assert!(time.markup.contains(r#"value="15:45:00""#));
        let both = render(&widget(
            "DateTime Input",
            json!({ "value": prop(json!("12/31/2023, 11:59 PM")) }),
        ));
        assert!(both.markup.contains(r#"value="2023-12-31T23:59:00""#));
    }

    fn chip(id: &str, label: &str) -> serde_json::Value {
        json!({
            "type": "INSTANCE", "id": id, "name": "Chip",
            "x": 0, "y": 0, "width": 40, "height": 20,
            "componentProperties": { "label#9:0": { "value": label } }
        })
    }

    #[test]
    fn test_select_single() {
        let node = widget_with(
            "Select",
            json!({ "multiselect": prop(json!(false)) }),
            json!({ "exposedInstances": [chip("61:1", "Red"), chip("61:2", "Blue")] }),
        );
        let code = render(&node);
        let state = state_identifier("select", "60:1");
        assert_eq!(
            code.script,
            format!(
                "import {{ Select }} from \"deskblocks\";\nlet {s}Options = [\"Red\", \"Blue\"];\nlet {s}Selected = [\"Red\"];\n",
                s = state
            )
        );
        assert!(code.markup.contains("maxSelect={1}"));
        assert!(code.markup.contains(&format!("bind:selected={{{}Selected}}", state)));
    }

    #[test]
    fn test_select_multi_selects_everything() {
        let node = widget_with(
            "Select",
            json!({ "multiselect#2:0": prop(json!(true)) }),
            json!({ "exposedInstances": [chip("61:1", "Red"), chip("61:2", "Blue")] }),
        );
        let code = render(&node);
        assert!(code.script.contains("Selected = [\"Red\", \"Blue\"];"));
        assert!(code.markup.contains("maxSelect={null}"));
    }

    #[test]
    fn test_tabs() {
        let item = |id: &str, name: &str, active: &str| {
            json!({
                "type": "INSTANCE", "id": id, "name": "_TabItem",
                "x": 0, "y": 0, "width": 40, "height": 20,
                "componentProperties": { "active": { "value": active }, "name#4:0": { "value": name } }
            })
        };
        let node = widget_with(
            "Tabs",
            json!({ "background": prop(json!("true")) }),
            json!({ "children": [item("62:1", "One", "true"), item("62:2", "Two", "false")] }),
        );
        let code = render(&node);
        assert_eq!(code.script, "import { Tabs, TabItem } from \"deskblocks\";\n");
        assert_eq!(
            code.markup,
            r#"<Tabs background><TabItem title="One" open></TabItem><TabItem title="Two"></TabItem></Tabs>"#
        );
    }

    #[test]
    fn test_small_widgets() {
        let avatar = render(&widget(
            "Avatar",
            json!({ "size": prop(json!("large")), "initial#1:0": prop(json!("JD")) }),
        ));
        assert_eq!(avatar.markup, r#"<Avatar size="large" name="JD"></Avatar>"#);

        let spinner = render(&widget(
            "Spinner",
            json!({ "size": prop(json!("small")), "onbrand": prop(json!("true")) }),
        ));
        assert_eq!(spinner.markup, r#"<Spinner size="small" onbrand></Spinner>"#);

        let chip = render(&widget(
            "Chip",
            json!({ "dismissible": prop(json!("false")), "label": prop(json!("Tag")) }),
        ));
        assert_eq!(chip.markup, "<Chip disabled={false}>Tag</Chip>");

        let help = render(&widget(
            "Form Help Message",
            json!({ "invalid": prop(json!("true")), "message#1:0": prop(json!("Required")) }),
        ));
        assert_eq!(
            help.markup,
            "<FormHelpMsg invalid={true} disabled={false}>Required</FormHelpMsg>"
        );
        assert!(help.script.contains("import { FormHelpMsg }"));

        let label = render(&widget(
            "Form Label",
            json!({ "required": prop(json!("true")), "label": prop(json!("Email")) }),
        ));
        assert_eq!(
            label.markup,
            "<FormLabel required={true} disabled={false}>Email</FormLabel>"
        );

        let area = render(&widget("Textarea", json!({ "value": prop(json!("hi")) })));
        assert_eq!(
            area.markup,
            r#"<Textarea resize="vertical" disabled={false} value="hi"></Textarea>"#
        );
    }

    #[test]
    fn test_unknown_and_hidden_widgets_are_empty() {
        assert!(render(&widget("Tooltip", json!({}))).is_empty());

        let hidden = widget_with("Button", json!({}), json!({ "visible": false }));
        assert!(render(&hidden).is_empty());
    }
}
