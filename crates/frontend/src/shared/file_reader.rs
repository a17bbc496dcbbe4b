use wasm_bindgen_futures::JsFuture;

/// Read a picked file fully into memory.
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read {}: {:?}", file.name(), e))?;

    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    Ok(uint8_array.to_vec())
}

/// First file of an `<input type="file">` change event. The input is
/// cleared so picking the same file again fires another `change`.
pub fn take_selected_file(ev: &leptos::ev::Event) -> Option<web_sys::File> {
    use wasm_bindgen::JsCast;

    let input = ev
        .target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()?;
    let file = input.files()?.get(0);
    input.set_value("");
    file
}
