use gloo::events::EventListener;
use gloo::utils::window;
use web_sys::MediaQueryList;
use yew::prelude::*;

pub const MOBILE_BREAKPOINT: u32 = 768;

pub fn mobile_media_query() -> String {
    format!("(max-width: {}px)", MOBILE_BREAKPOINT)
}

/// Whether the viewport is at or below the mobile breakpoint.
///
/// Reports `false` until the first measurement, then follows the media
/// query's `change` events until unmount.
#[hook]
pub fn use_is_mobile() -> bool {
    let is_mobile = use_state(|| false);

    {
        let is_mobile = is_mobile.clone();
        use_effect_with((), move |_| {
            let media: Option<MediaQueryList> = window()
                .match_media(&mobile_media_query())
                .ok()
                .flatten();

            let listener = media.map(|media| {
                is_mobile.set(media.matches());

                let target = media.clone();
                EventListener::new(&media, "change", move |_| {
                    is_mobile.set(target.matches());
                })
            });

            // Dropping the listener unsubscribes
            move || drop(listener)
        });
    }

    *is_mobile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_query_text() {
        assert_eq!(mobile_media_query(), "(max-width: 768px)");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_browser_accepts_media_query() {
        let media = window().match_media(&mobile_media_query()).unwrap();
        assert!(media.is_some());
    }
}
