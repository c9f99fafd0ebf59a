//! Line-delimited JSON-RPC protocol of `hookbridge-worker`.
//!
//! One request per line on stdin, one response per line on stdout.
//! Dispatch is generic over the input sink so the protocol can be tested
//! without touching the real input queue.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use hookbridge_core::clock;
use hookbridge_core::inject::{Injector, InputSink};
use hookbridge_core::wait;

#[derive(Debug, Deserialize)]
pub struct Request {
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn from_result(id: u64, result: Result<Value, String>) -> Self {
        match result {
            Ok(value) => Self {
                id,
                result: Some(value),
                error: None,
            },
            Err(error) => Self {
                id,
                result: None,
                error: Some(error),
            },
        }
    }
}

/// Extract an i32 from a JSON value, clamping i64 to i32 range.
fn json_i32(val: Option<&Value>) -> i32 {
    val.and_then(|v| v.as_i64())
        .unwrap_or(0)
        .clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

fn json_vk(val: Option<&Value>) -> u16 {
    val.and_then(|v| v.as_u64()).unwrap_or(0).min(u16::MAX as u64) as u16
}

fn json_bool(val: Option<&Value>) -> bool {
    val.and_then(|v| v.as_bool()).unwrap_or(false)
}

/// Execute one request against `injector`.
pub fn dispatch<S: InputSink>(
    injector: &Injector<S>,
    method: &str,
    params: &Value,
) -> Result<Value, String> {
    let done = |r: Result<(), hookbridge_core::errors::HookBridgeError>| {
        r.map(|()| Value::Bool(true)).map_err(|e| e.to_string())
    };

    match method {
        "move_mouse" => done(injector.move_mouse(json_i32(params.get("x")), json_i32(params.get("y")))),
        "move_mouse_smooth" => done(injector.move_mouse_smooth(
            json_i32(params.get("x")),
            json_i32(params.get("y")),
            json_i32(params.get("steps")),
            json_i32(params.get("delay_ms")),
        )),
        "mouse_button" => {
            let button = json_i32(params.get("button"));
            if json_bool(params.get("is_down")) {
                done(injector.mouse_button_down(button))
            } else {
                done(injector.mouse_button_up(button))
            }
        }
        "mouse_click" => done(injector.mouse_click(json_i32(params.get("button")))),
        "mouse_wheel" => done(injector.mouse_wheel(json_i32(params.get("delta")))),
        "key" => {
            let vk = json_vk(params.get("vk_code"));
            if json_bool(params.get("key_up")) {
                done(injector.key_up(vk))
            } else {
                done(injector.key_down(vk))
            }
        }
        "key_press" => done(injector.key_press(json_vk(params.get("vk_code")))),
        "precise_sleep" => {
            let ms = params.get("ms").and_then(|v| v.as_f64()).unwrap_or(0.0);
            wait::precise_sleep(ms);
            Ok(Value::Bool(true))
        }
        "timestamp" => Ok(Value::from(clock::global().now_ms())),
        "ping" => Ok(Value::String("pong".to_owned())),
        _ => Err(format!("unknown method: {method}")),
    }
}

/// Parse one request line and produce the response to write back.
pub fn handle_line<S: InputSink>(injector: &Injector<S>, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(req) => Response::from_result(req.id, dispatch(injector, &req.method, &req.params)),
        // Parse error -- use id=0 since we can't extract it.
        Err(e) => Response::from_result(0, Err(format!("invalid JSON: {e}"))),
    }
}
