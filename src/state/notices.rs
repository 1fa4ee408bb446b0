use leptos::prelude::*;

/// Transient notices auto-dismiss after this long.
pub(crate) const NOTICE_TTL_MS: i32 = 6000;

/// The stack stays short; older notices drop out first.
const MAX_NOTICES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum NoticeLevel {
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub message: String,
}

/// Signal-backed queue of transient messages, shown bottom-right by
/// `NoticesHost`. Mutation failures land here; load failures use the page's
/// own error surface instead.
#[derive(Clone, Copy)]
pub(crate) struct NoticeCenter {
    items: RwSignal<Vec<Notice>>,
    next_id: RwSignal<u64>,
}

impl NoticeCenter {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn items(&self) -> RwSignal<Vec<Notice>> {
        self.items
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    fn push(&self, level: NoticeLevel, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        let notice = Notice { id, level, message };
        self.items.update(|xs| {
            let next = pushed(std::mem::take(xs), notice, MAX_NOTICES);
            *xs = next;
        });
        self.schedule_dismiss(id);
    }

    pub fn dismiss(&self, id: u64) {
        self.items.update(|xs| xs.retain(|n| n.id != id));
    }

    #[cfg(target_arch = "wasm32")]
    fn schedule_dismiss(&self, id: u64) {
        use wasm_bindgen::JsCast;

        let Some(win) = web_sys::window() else {
            return;
        };

        let me = *self;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || {
            me.dismiss(id);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            NOTICE_TTL_MS,
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn schedule_dismiss(&self, _id: u64) {}
}

fn pushed(mut items: Vec<Notice>, notice: Notice, max: usize) -> Vec<Notice> {
    items.push(notice);
    while items.len() > max {
        items.remove(0);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(id: u64, msg: &str) -> Notice {
        Notice {
            id,
            level: NoticeLevel::Error,
            message: msg.to_string(),
        }
    }

    #[test]
    fn test_pushed_appends_in_order() {
        let items = pushed(vec![notice(1, "first")], notice(2, "second"), 4);
        let ids: Vec<u64> = items.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_pushed_caps_stack_dropping_oldest() {
        let mut items = Vec::new();
        for id in 1..=5 {
            items = pushed(items, notice(id, "x"), 4);
        }
        let ids: Vec<u64> = items.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
    }
}
