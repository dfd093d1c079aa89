use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use uuid::Uuid;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// How long a toast stays up before dismissing itself
pub const TOAST_DURATION_MS: u32 = 3000;

const TOAST_ID_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

pub enum ToastAction {
    Add(Toast),
    /// Remove one toast by id, or every toast with `None`
    Dismiss(Option<String>),
}

/// Toasts currently on screen, oldest first
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastQueue {
    pub toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn apply(&mut self, action: ToastAction) {
        match action {
            ToastAction::Add(toast) => self.toasts.push(toast),
            ToastAction::Dismiss(Some(id)) => self.toasts.retain(|toast| toast.id != id),
            ToastAction::Dismiss(None) => self.toasts.clear(),
        }
    }
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

pub fn new_toast_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(TOAST_ID_LEN);
    id
}

/// Handle handed out by [`use_toast`].
///
/// Outside a [`ToastProvider`] the handle is inert: toasts are accepted and
/// dropped.
#[derive(Clone, PartialEq, Default)]
pub struct ToastHandle {
    queue: Option<UseReducerHandle<ToastQueue>>,
}

impl ToastHandle {
    pub fn toasts(&self) -> Vec<Toast> {
        self.queue
            .as_ref()
            .map(|queue| queue.toasts.clone())
            .unwrap_or_default()
    }

    /// Show a toast and schedule its dismissal; returns the toast id
    pub fn toast(&self, title: &str, description: Option<&str>, variant: ToastVariant) -> String {
        let id = new_toast_id();
        let Some(queue) = self.queue.clone() else {
            return id;
        };

        queue.dispatch(ToastAction::Add(Toast {
            id: id.clone(),
            title: Some(title.to_string()),
            description: description.map(str::to_string),
            variant,
        }));

        let dispatcher = queue.dispatcher();
        let expired = id.clone();
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            dispatcher.dispatch(ToastAction::Dismiss(Some(expired)));
        });

        id
    }

    pub fn dismiss(&self, id: Option<String>) {
        if let Some(queue) = &self.queue {
            queue.dispatch(ToastAction::Dismiss(id));
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let queue = use_reducer(ToastQueue::default);
    let handle = ToastHandle { queue: Some(queue) };

    html! {
        <ContextProvider<ToastHandle> context={handle}>
            {props.children.clone()}
        </ContextProvider<ToastHandle>>
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    use_context::<ToastHandle>().unwrap_or_default()
}
