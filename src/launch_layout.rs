use serde::Serialize;

pub const LAUNCHER_ZOOM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StyleProperty {
    Width,
    MaxWidth,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRule {
    pub element_id: &'static str,
    pub property: StyleProperty,
    pub px: f64,
}

/// Widths that keep the launch progress bar aligned with the bottom bar.
pub const LAUNCH_LAYOUT: [LayoutRule; 4] = [
    LayoutRule {
        element_id: "launch_details",
        property: StyleProperty::MaxWidth,
        px: 266.01,
    },
    LayoutRule {
        element_id: "launch_progress",
        property: StyleProperty::Width,
        px: 170.8,
    },
    LayoutRule {
        element_id: "launch_details_right",
        property: StyleProperty::MaxWidth,
        px: 170.8,
    },
    LayoutRule {
        element_id: "launch_progress_label",
        property: StyleProperty::Width,
        px: 53.21,
    },
];

pub fn build_launch_layout_script(rules: &[LayoutRule]) -> Result<String, String> {
    let rules_json = serde_json::to_string(rules)
        .map_err(|error| format!("Failed to serialize launch layout: {error}"))?;
    Ok(format!(
        r#"(function () {{
  var rules = {rules_json};
  rules.forEach(function (rule) {{
    var element = document.getElementById(rule.elementId);
    if (element) {{
      element.style[rule.property] = rule.px + 'px';
    }}
  }});
}})();"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_launch_layout_script_embeds_every_rule() {
        let script = build_launch_layout_script(&LAUNCH_LAYOUT).expect("build script");
        assert!(script.contains(r#"{"elementId":"launch_details","property":"maxWidth","px":266.01}"#));
        assert!(script.contains(r#"{"elementId":"launch_progress","property":"width","px":170.8}"#));
        assert!(script.contains(r#""launch_details_right","property":"maxWidth","px":170.8"#));
        assert!(script.contains(r#""launch_progress_label","property":"width","px":53.21"#));
    }

    #[test]
    fn build_launch_layout_script_handles_no_rules() {
        let script = build_launch_layout_script(&[]).expect("build script");
        assert!(script.contains("var rules = [];"));
    }
}
