use tokio::sync::mpsc;

/// Create a connected sender/inbox pair.
pub fn inbox<T>() -> (InboxSender<T>, Inbox<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (InboxSender { tx }, Inbox { rx })
}

/// Posting half, handed to async tasks. Cheap to clone.
#[derive(Debug)]
pub struct InboxSender<T> {
    tx: mpsc::UnboundedSender<T>,
}

impl<T> Clone for InboxSender<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> InboxSender<T> {
    /// Never blocks. Fails only once the inbox was dropped, handing the item
    /// back.
    pub fn post(&self, item: T) -> Result<(), InboxClosed<T>> {
        self.tx.send(item).map_err(|e| InboxClosed(e.0))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned by the frame loop and drained once per tick.
#[derive(Debug)]
pub struct Inbox<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Inbox<T> {
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Everything posted so far, in posting order, without waiting.
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next() {
            items.push(item);
        }
        items
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// No sender is left, so nothing else can arrive.
    pub fn senders_gone(&self) -> bool {
        self.rx.is_closed()
    }
}

/// The inbox was dropped; carries the undelivered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboxClosed<T>(pub T);

impl<T> std::fmt::Display for InboxClosed<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("inbox closed")
    }
}

impl<T: std::fmt::Debug> std::error::Error for InboxClosed<T> {}

#[cfg(test)]
mod tests {
    use super::{InboxClosed, inbox};
    use pretty_assertions::assert_eq;

    #[test]
    fn drain_returns_items_in_post_order() {
        let (tx, mut rx) = inbox();
        tx.post(1).expect("post");
        tx.clone().post(2).expect("post");
        assert!(!rx.is_empty());
        assert_eq!(rx.drain(), vec![1, 2]);
        assert!(rx.is_empty());
        assert_eq!(rx.drain(), Vec::<i32>::new());
    }

    #[test]
    fn post_after_inbox_dropped_returns_item() {
        let (tx, rx) = inbox();
        drop(rx);
        assert!(tx.is_closed());
        assert_eq!(tx.post("terrain"), Err(InboxClosed("terrain")));
    }

    #[test]
    fn inbox_notices_when_senders_are_gone() {
        let (tx, mut rx) = inbox::<u8>();
        assert!(!rx.senders_gone());
        tx.post(7).expect("post");
        drop(tx);
        assert!(rx.senders_gone());
        assert_eq!(rx.try_next(), Some(7));
        assert_eq!(rx.try_next(), None);
    }

    #[tokio::test]
    async fn delivers_from_spawned_task() {
        let (tx, mut rx) = inbox();
        let handle = tokio::spawn(async move {
            tx.post(String::from("payload")).expect("post");
        });
        handle.await.expect("task");
        assert_eq!(rx.drain(), vec![String::from("payload")]);
    }
}
