use leptos::prelude::*;

/// Badge with a colour variant: "primary", "success", "warning", "error",
/// "neutral" (default).
#[component]
pub fn Badge(
    #[prop(optional, into)] variant: MaybeProp<String>,
    children: Children,
    #[prop(optional, into)] class: MaybeProp<String>,
) -> impl IntoView {
    let variant_class = move || variant_class(variant.get().as_deref());
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <span class=move || format!("badge {} {}", variant_class(), additional_class())>
            {children()}
        </span>
    }
}

fn variant_class(variant: Option<&str>) -> &'static str {
    match variant.unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_class() {
        assert_eq!(variant_class(Some("success")), "badge--success");
        assert_eq!(variant_class(Some("whatever")), "badge--neutral");
        assert_eq!(variant_class(None), "badge--neutral");
    }
}
