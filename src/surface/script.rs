//! JavaScript snippet builders for `Runtime.evaluate`. Arguments are embedded
//! as JSON string literals so arbitrary selectors and asset ids stay intact.
//!
//! Snippets that interact return a `{success, matched?, error?}` object
//! decoded into [`super::SelectOutcome`].

fn js_str(value: &str) -> String {
    // serde_json string encoding is a valid JS string literal.
    serde_json::to_string(value).expect("string serialization is infallible")
}

/// `document.readyState`, polled during page-open.
pub fn ready_state() -> String {
    "document.readyState".to_string()
}

/// Whether `selector` currently matches an element.
pub fn element_exists(selector: &str) -> String {
    format!("!!document.querySelector({})", js_str(selector))
}

/// Click the first element matching `selector`.
pub fn click_selector(selector: &str) -> String {
    format!(
        r#"(() => {{
  const el = document.querySelector({sel});
  if (!el) {{ return {{ success: false, error: "element not found" }}; }}
  el.click();
  return {{ success: true }};
}})()"#,
        sel = js_str(selector)
    )
}

/// Click the `index`-th (0-based) child of the category picker strip.
pub fn click_nth_category(picker: &str, index: u32) -> String {
    format!(
        r#"(() => {{
  const picker = document.querySelector({picker});
  if (!picker || !picker.children[{index}]) {{
    return {{ success: false, error: "category picker child {index} not found" }};
  }}
  picker.children[{index}].click();
  return {{ success: true }};
}})()"#,
        picker = js_str(picker),
    )
}

/// Click the `index`-th (0-based) subcategory control. The panel nests the
/// controls two levels below the picker root.
pub fn click_nth_subcategory(picker: &str, index: u32) -> String {
    format!(
        r#"(() => {{
  const picker = document.querySelector({picker});
  const row = picker && picker.firstChild && picker.firstChild.firstChild;
  if (!row || !row.children[{index}]) {{
    return {{ success: false, error: "subcategory control {index} not found" }};
  }}
  row.children[{index}].click();
  return {{ success: true }};
}})()"#,
        picker = js_str(picker),
    )
}

/// Incrementally scroll the lazy asset list for `seconds` so virtualized
/// items render before a search. Awaited as a promise.
pub fn scroll_list(list: &str, seconds: u64) -> String {
    format!(
        r#"(async () => {{
  const list = document.querySelector({list});
  if (!list) {{ return {{ success: false, error: "asset list container not found" }}; }}
  const deadline = Date.now() + {seconds} * 1000;
  while (Date.now() < deadline) {{
    list.scrollTop += 200;
    await new Promise((resolve) => setTimeout(resolve, 100));
  }}
  return {{ success: true }};
}})()"#,
        list = js_str(list),
    )
}

/// Click the first asset item whose image source contains `needle`.
/// Identifiers embed generated asset ids, hence the substring match.
pub fn select_asset_containing(list: &str, item: &str, needle: &str) -> String {
    format!(
        r#"(() => {{
  if (!document.querySelector({list})) {{
    return {{ success: false, error: "asset list container not found" }};
  }}
  const needle = {needle};
  for (const item of document.querySelectorAll({item})) {{
    const img = item.querySelector("img");
    if (img && img.src && img.src.includes(needle)) {{
      img.click();
      return {{ success: true, matched: img.src }};
    }}
  }}
  return {{ success: false, error: "no asset identifier contains " + needle }};
}})()"#,
        list = js_str(list),
        item = js_str(item),
        needle = js_str(needle),
    )
}

/// Click the control whose `aria-label` equals `label` exactly.
pub fn select_labeled(label: &str) -> String {
    // The attribute value is quoted inside the selector, so the equality is
    // exact even for labels with spaces.
    let selector = format!("[aria-label={}]", js_str(label));
    format!(
        r#"(() => {{
  const control = document.querySelector({sel});
  if (!control) {{ return {{ success: false, error: "no control labeled " + {label} }}; }}
  control.click();
  return {{ success: true, matched: {label} }};
}})()"#,
        sel = js_str(&selector),
        label = js_str(label),
    )
}
