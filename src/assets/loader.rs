//! Runs asset loads on worker threads and hands results back to the frame loop.

use super::{AssetError, AssetProvider, Image, LoadRequest, LoadTicket};
use std::sync::Arc;
use std::thread::JoinHandle;

/// Background loader. Each request gets its own thread; finished loads are
/// collected with [`AssetLoader::poll`] once per frame.
pub struct AssetLoader {
    provider: Arc<dyn AssetProvider>,
    in_flight: Vec<(LoadTicket, JoinHandle<Result<Image, AssetError>>)>,
}

impl AssetLoader {
    pub fn new(provider: Arc<dyn AssetProvider>) -> Self {
        Self {
            provider,
            in_flight: Vec::new(),
        }
    }

    pub fn spawn(&mut self, request: LoadRequest) {
        let provider = Arc::clone(&self.provider);
        let LoadRequest { ticket, source } = request;
        let handle = std::thread::spawn(move || provider.load(&source));
        self.in_flight.push((ticket, handle));
    }

    pub fn spawn_all(&mut self, requests: impl IntoIterator<Item = LoadRequest>) {
        for request in requests {
            self.spawn(request);
        }
    }

    /// Completed loads since the last poll. Never blocks.
    pub fn poll(&mut self) -> Vec<(LoadTicket, Result<Image, AssetError>)> {
        let mut done = Vec::new();
        let mut pending = Vec::with_capacity(self.in_flight.len());
        for (ticket, handle) in self.in_flight.drain(..) {
            if !handle.is_finished() {
                pending.push((ticket, handle));
                continue;
            }
            let result = handle.join().unwrap_or_else(|_| {
                Err(AssetError::Empty(format!(
                    "loader thread for {} panicked",
                    ticket.kind.name()
                )))
            });
            done.push((ticket, result));
        }
        self.in_flight = pending;
        done
    }

    /// Block until every outstanding load finishes.
    pub fn wait_all(&mut self) -> Vec<(LoadTicket, Result<Image, AssetError>)> {
        let mut done = Vec::new();
        for (ticket, handle) in self.in_flight.drain(..) {
            let result = handle.join().unwrap_or_else(|_| {
                Err(AssetError::Empty(format!(
                    "loader thread for {} panicked",
                    ticket.kind.name()
                )))
            });
            done.push((ticket, result));
        }
        done
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetGate, AssetSource, BuiltinAsset, FileAssetProvider, SpriteSources};

    #[test]
    fn test_loader_feeds_gate() {
        let mut gate = AssetGate::new(
            AssetSource::Builtin(BuiltinAsset::Background),
            SpriteSources::builtin(),
        );
        let mut loader = AssetLoader::new(Arc::new(FileAssetProvider));
        loader.spawn_all(gate.request_all());
        assert_eq!(loader.in_flight(), 4);

        for (ticket, result) in loader.wait_all() {
            assert!(gate.complete(ticket, result).is_none());
        }
        assert!(gate.is_ready());
        assert_eq!(loader.in_flight(), 0);
    }

    #[test]
    fn test_missing_background_recovers_through_fallback() {
        let mut gate = AssetGate::new(
            AssetSource::file("/no/such/background.png"),
            SpriteSources::builtin(),
        );
        let mut loader = AssetLoader::new(Arc::new(FileAssetProvider));
        loader.spawn_all(gate.request_all());
        while loader.in_flight() > 0 {
            for (ticket, result) in loader.wait_all() {
                if let Some(retry) = gate.complete(ticket, result) {
                    loader.spawn(retry);
                }
            }
        }
        assert!(gate.is_ready());
    }
}
