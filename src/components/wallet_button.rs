use dioxus::prelude::*;
use futures::StreamExt;
use thiserror::Error;

use crate::{TreeState, WalletState};

/// Failures surfaced by the browser wallet. A rejected signature is a
/// failed action; nothing here retries.
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("wallet not connected")]
    NotConnected,
    #[error("user rejected the request")]
    UserRejected,
    #[error("wallet adapter: {0}")]
    Adapter(String),
}

#[derive(Clone)]
enum WalletAction {
    Connect,
    // Eager reconnect on page load; Phantom only honors it for sites the
    // user already trusted, and a refusal stays silent.
    Resume,
}

#[component]
pub fn WalletButton() -> Element {
    let mut wallet = use_context::<Signal<WalletState>>();
    let mut tree = use_context::<Signal<TreeState>>();

    // Use coroutine for lifecycle-safe async operations
    let wallet_coro = use_coroutine(move |mut rx: UnboundedReceiver<WalletAction>| {
        async move {
            while let Some(action) = rx.next().await {
                #[cfg(feature = "web")]
                {
                    let only_if_trusted = matches!(action, WalletAction::Resume);
                    match connect_phantom(only_if_trusted).await {
                        Ok(pubkey) => {
                            wallet.write().connected = true;
                            wallet.write().pubkey = Some(pubkey);
                        }
                        Err(WalletError::UserRejected) if only_if_trusted => {}
                        Err(e) => {
                            tracing::error!("Wallet connection failed: {}", e);
                        }
                    }
                }
                #[cfg(not(feature = "web"))]
                let _ = action;
            }
        }
    });

    use_future(move || async move {
        wallet_coro.send(WalletAction::Resume);
    });

    let connect_wallet = move |_| {
        wallet_coro.send(WalletAction::Connect);
    };

    let disconnect_wallet = move |_| {
        wallet.write().connected = false;
        wallet.write().pubkey = None;
        // The counter belongs to the session; a fresh connect refetches it.
        *tree.write() = TreeState::default();
        #[cfg(feature = "web")]
        spawn(async move {
            disconnect_phantom().await;
        });
    };

    let wallet_read = wallet.read();

    if wallet_read.connected {
        let pubkey = wallet_read.pubkey.clone().unwrap_or_default();
        let short_pubkey = if pubkey.len() > 8 {
            format!("{}...{}", &pubkey[..4], &pubkey[pubkey.len() - 4..])
        } else {
            pubkey.clone()
        };

        rsx! {
            div { class: "flex items-center space-x-2",
                span { class: "text-sm text-gray-400 font-mono", "{short_pubkey}" }
                button {
                    class: "btn btn-secondary text-sm",
                    onclick: disconnect_wallet,
                    "Disconnect"
                }
            }
        }
    } else {
        rsx! {
            button {
                class: "btn btn-primary",
                onclick: connect_wallet,
                "Connect Wallet"
            }
        }
    }
}

#[cfg(feature = "web")]
fn classify_rejection(e: wasm_bindgen::JsValue) -> WalletError {
    let detail = format!("{:?}", e);
    if detail.contains("User rejected") {
        WalletError::UserRejected
    } else {
        WalletError::Adapter(detail)
    }
}

#[cfg(feature = "web")]
async fn connect_phantom(only_if_trusted: bool) -> Result<String, WalletError> {
    use js_sys::{Object, Promise, Reflect};
    use wasm_bindgen::prelude::*;

    let window = web_sys::window().ok_or_else(|| WalletError::Adapter("No window".into()))?;

    // Check if Phantom is installed
    let solana = Reflect::get(&window, &JsValue::from_str("solana"))
        .map_err(|_| WalletError::Adapter("Phantom not found".into()))?;

    if solana.is_undefined() {
        if !only_if_trusted {
            // Open Phantom install page
            let _ = window.open_with_url("https://phantom.app/");
        }
        return Err(WalletError::Adapter(
            "Phantom not installed. Please install it and refresh.".into(),
        ));
    }

    // Check if it's Phantom
    let is_phantom = Reflect::get(&solana, &JsValue::from_str("isPhantom"))
        .map_err(|_| WalletError::Adapter("Not Phantom".into()))?;

    if !is_phantom.as_bool().unwrap_or(false) {
        return Err(WalletError::Adapter("Please use Phantom wallet".into()));
    }

    // Request connection
    let connect_fn = Reflect::get(&solana, &JsValue::from_str("connect"))
        .map_err(|_| WalletError::Adapter("No connect method".into()))?;

    let connect_fn: js_sys::Function = connect_fn
        .dyn_into()
        .map_err(|_| WalletError::Adapter("connect is not a function".into()))?;

    let promise = if only_if_trusted {
        let opts = Object::new();
        Reflect::set(
            &opts,
            &JsValue::from_str("onlyIfTrusted"),
            &JsValue::from_bool(true),
        )
        .map_err(|_| WalletError::Adapter("Failed to set onlyIfTrusted".into()))?;
        connect_fn.call1(&solana, &opts.into())
    } else {
        connect_fn.call0(&solana)
    }
    .map_err(|e| WalletError::Adapter(format!("Connect call failed: {:?}", e)))?;

    let promise: Promise = promise
        .dyn_into()
        .map_err(|_| WalletError::Adapter("Not a promise".into()))?;

    let result = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(classify_rejection)?;

    // Get public key
    let public_key = Reflect::get(&result, &JsValue::from_str("publicKey"))
        .map_err(|_| WalletError::Adapter("No publicKey in response".into()))?;

    let to_string_fn = Reflect::get(&public_key, &JsValue::from_str("toString"))
        .map_err(|_| WalletError::Adapter("No toString method".into()))?;

    let to_string_fn: js_sys::Function = to_string_fn
        .dyn_into()
        .map_err(|_| WalletError::Adapter("toString is not a function".into()))?;

    let pubkey_str = to_string_fn
        .call0(&public_key)
        .map_err(|e| WalletError::Adapter(format!("toString failed: {:?}", e)))?;

    pubkey_str
        .as_string()
        .ok_or_else(|| WalletError::Adapter("Public key not a string".into()))
}

/// Tell Phantom to drop the session. Local state is already cleared by the
/// caller, so failures only get logged.
#[cfg(feature = "web")]
async fn disconnect_phantom() {
    use js_sys::{Promise, Reflect};
    use wasm_bindgen::prelude::*;

    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(solana) = Reflect::get(&window, &JsValue::from_str("solana")) else {
        return;
    };
    if solana.is_undefined() {
        return;
    }

    let disconnect_fn = Reflect::get(&solana, &JsValue::from_str("disconnect"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());

    if let Some(disconnect_fn) = disconnect_fn {
        if let Ok(promise) = disconnect_fn.call0(&solana) {
            if let Ok(promise) = promise.dyn_into::<Promise>() {
                if let Err(e) = wasm_bindgen_futures::JsFuture::from(promise).await {
                    tracing::warn!("Phantom disconnect failed: {:?}", e);
                }
            }
        }
    }
}

/// Sign and send a transaction via Phantom
#[cfg(feature = "web")]
pub async fn sign_and_send_transaction(tx_bytes: &[u8]) -> Result<String, WalletError> {
    use js_sys::{Promise, Reflect, Uint8Array};
    use wasm_bindgen::prelude::*;

    let window = web_sys::window().ok_or_else(|| WalletError::Adapter("No window".into()))?;

    let solana = Reflect::get(&window, &JsValue::from_str("solana"))
        .map_err(|_| WalletError::NotConnected)?;

    if solana.is_undefined() {
        return Err(WalletError::NotConnected);
    }

    // Create Uint8Array from bytes
    let tx_array = Uint8Array::new_with_length(tx_bytes.len() as u32);
    tx_array.copy_from(tx_bytes);

    // Call Phantom's signAndSendTransaction
    let sign_fn = Reflect::get(&solana, &JsValue::from_str("signAndSendTransaction"))
        .map_err(|_| WalletError::Adapter("No signAndSendTransaction method".into()))?;

    let sign_fn: js_sys::Function = sign_fn
        .dyn_into()
        .map_err(|_| WalletError::Adapter("signAndSendTransaction is not a function".into()))?;

    let promise = sign_fn
        .call1(&solana, &tx_array.into())
        .map_err(|e| WalletError::Adapter(format!("Sign call failed: {:?}", e)))?;

    let promise: Promise = promise
        .dyn_into()
        .map_err(|_| WalletError::Adapter("Not a promise".into()))?;

    let result = wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map_err(classify_rejection)?;

    // Get signature
    let signature = Reflect::get(&result, &JsValue::from_str("signature"))
        .ok()
        .and_then(|s| s.as_string())
        .ok_or_else(|| WalletError::Adapter("No signature in response".into()))?;

    Ok(signature)
}

#[cfg(not(feature = "web"))]
pub async fn sign_and_send_transaction(_tx_bytes: &[u8]) -> Result<String, WalletError> {
    Err(WalletError::Adapter(
        "Transaction signing only available in web mode".into(),
    ))
}
