use std::io;

use perdiem_engine::{EngineError, SuccessEnvelope};
use serde::Serialize;
use serde_json::{Value, json};

const JSON_VERSION: &str = "v1";

pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    let value = match success.command.as_str() {
        "compute" | "eval" | "tariff show" => render_envelope_json(&success.data),
        _ => {
            return Err(io::Error::other(format!(
                "JSON output is not supported for command `{}`",
                success.command
            )));
        }
    };

    serialize_json_pretty(&value)
}

pub fn render_error_json(error: &EngineError) -> io::Result<String> {
    let mut contract = json!({
        "code": error.code,
        "message": error.message,
        "recovery_steps": error.recovery_steps,
    });
    if let (Some(object), Some(data)) = (contract.as_object_mut(), error.data.as_ref()) {
        object.insert("data".to_string(), data.clone());
    }
    serialize_json_pretty(&json!({ "error": contract }))
}

fn render_envelope_json(data: &Value) -> Value {
    json!({
        "ok": true,
        "version": JSON_VERSION,
        "data": data.clone()
    })
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use perdiem_engine::SuccessEnvelope;
    use serde_json::{Value, json};

    use super::{render_error_json, render_success_json};

    fn success(command: &str, data: Value) -> SuccessEnvelope {
        SuccessEnvelope {
            ok: true,
            command: command.to_string(),
            version: "0.1.0".to_string(),
            data,
        }
    }

    #[test]
    fn compute_json_uses_structured_envelope() {
        let payload = success(
            "compute",
            json!({
                "total": "867.00",
                "per_diem": "525.00"
            }),
        );

        let rendered = render_success_json(&payload);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(value["ok"], Value::Bool(true));
                assert_eq!(value["version"], Value::String("v1".to_string()));
                assert_eq!(value["data"]["total"], Value::String("867.00".to_string()));
            }
        }
    }

    #[test]
    fn runtime_error_json_uses_universal_shape() {
        let error = perdiem_engine::EngineError::new(
            "corpus_unreadable",
            "missing",
            vec!["check the path".to_string()],
        );
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["code"],
                    Value::String("corpus_unreadable".to_string())
                );
                assert!(value.get("ok").is_none());
                assert!(value["error"].get("data").is_none());
            }
        }
    }

    #[test]
    fn error_json_carries_structured_data_when_present() {
        let error = perdiem_engine::EngineError::new(
            "tariff_unsound",
            "constant table failed validation",
            vec!["fix the artifact".to_string()],
        )
        .with_data(json!({ "problems": ["per_diem_rate must be positive"] }));
        let rendered = render_error_json(&error);
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            let parsed: Result<Value, _> = serde_json::from_str(&text);
            assert!(parsed.is_ok());
            if let Ok(value) = parsed {
                assert_eq!(
                    value["error"]["data"]["problems"][0],
                    Value::String("per_diem_rate must be positive".to_string())
                );
            }
        }
    }

    #[test]
    fn unknown_command_is_rejected() {
        let payload = success("mystery", json!({}));
        assert!(render_success_json(&payload).is_err());
    }
}
