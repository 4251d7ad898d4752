//! DBC text emission.
//!
//! [`serialize_network`] walks a [`Network`] in the canonical DBC section
//! order and builds the whole file as a string; [`save_to_file`] wraps it
//! with path checks and buffered I/O. Emission is deterministic: blocks
//! follow map key order, and every optional clause (comments, value
//! descriptions, `SIG_VALTYPE_`, `BO_TX_BU_`, `ENVVAR_DATA_`) is written
//! only when the underlying field is non-default.

use std::fmt::{self, Write as FmtWrite};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::types::{
    attributes::{AttrObject, AttrValueType, AttributeDefinition, AttributeValue},
    env_var::{AccessType, EnvVarType, EnvironmentVariable},
    errors::DbcSaveError,
    network::Network,
    signal::{Endianness, ExtendedValueType, Signess},
    value_table::SignalType,
};

/// Placeholder node name used when a message or signal has no real peer.
const VECTOR_XXX: &str = "Vector__XXX";

/// Serializes a `Network` into DBC text and writes it to `path`.
///
/// Ensures the destination has a `.dbc` extension, creates intermediate
/// directories when needed, and reports structured `DbcSaveError` variants
/// for path, I/O, or formatting failures.
pub fn save_to_file(path: &str, network: &Network) -> Result<(), DbcSaveError> {
    if !path.to_ascii_lowercase().ends_with(".dbc") {
        return Err(DbcSaveError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let serialized: String = serialize_network(network)?;

    let path_ref: &Path = Path::new(path);
    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| DbcSaveError::CreateDirectory {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file = File::create(path_ref).map_err(|source| DbcSaveError::CreateFile {
        path: path.to_string(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(serialized.as_bytes())
        .map_err(|source| DbcSaveError::Write {
            path: path.to_string(),
            source,
        })?;
    writer.flush().map_err(|source| DbcSaveError::Write {
        path: path.to_string(),
        source,
    })?;
    Ok(())
}

/// Serializes the network into raw DBC text.
///
/// Section order: version, new symbols, bit timing, node list, typeless
/// value tables, messages with their signals, transmitter overrides,
/// environment variables (plus data sizes), value-table signal types,
/// comments, attribute definitions/defaults/values, value descriptions and
/// extended value types.
pub fn serialize_network(net: &Network) -> Result<String, DbcSaveError> {
    let mut out = String::new();

    let version = escape_dbc_string(&net.version);
    write_fmt(&mut out, format_args!("VERSION \"{}\"\n\n", version))?;

    out.push_str("NS_ :\n");
    for symbol in &net.new_symbols {
        out.push('\t');
        out.push_str(symbol);
        out.push('\n');
    }
    out.push('\n');

    if net.bit_timing.is_set() {
        write_fmt(
            &mut out,
            format_args!(
                "BS_: {}:{},{}\n\n",
                net.bit_timing.baudrate, net.bit_timing.btr1, net.bit_timing.btr2
            ),
        )?;
    } else {
        out.push_str("BS_:\n\n");
    }

    out.push_str("BU_:");
    for (name, _) in net.iter_nodes() {
        out.push(' ');
        out.push_str(name);
    }
    out.push('\n');
    out.push('\n');

    write_value_tables(net, &mut out)?;
    write_messages(net, &mut out)?;
    write_bo_tx_bu(net, &mut out)?;
    out.push('\n');

    write_environment_variables(net, &mut out)?;
    write_signal_types(net, &mut out)?;
    write_comments(net, &mut out)?;
    out.push('\n');

    write_attribute_definitions(net, &mut out)?;
    write_attribute_defaults(net, &mut out)?;
    write_attribute_values(net, &mut out)?;
    out.push('\n');

    write_value_descriptions(net, &mut out)?;
    write_sig_valtype(net, &mut out)?;

    Ok(out)
}

/// `VAL_TABLE_` lines for tables without a signal type; the others are
/// emitted later as `SGTYPE_` lines.
fn write_value_tables(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (name, table) in net.iter_value_tables() {
        if table.signal_type.is_some() {
            continue;
        }
        write_fmt(out, format_args!("VAL_TABLE_ {}", name))?;
        for (value, description) in &table.value_descriptions {
            let desc = escape_dbc_string(description);
            write_fmt(out, format_args!(" {} \"{}\"", value, desc))?;
        }
        out.push_str(";\n");
    }

    Ok(())
}

fn write_messages(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (id, message) in net.iter_messages() {
        let transmitter = if message.transmitter.is_empty() {
            VECTOR_XXX
        } else {
            message.transmitter.as_str()
        };

        write_fmt(
            out,
            format_args!(
                "BO_ {} {}: {} {}\n",
                id, message.name, message.byte_length, transmitter
            ),
        )?;

        for (_, signal) in message.iter_signals() {
            let endian = match signal.byte_order {
                Endianness::Intel => '1',
                Endianness::Motorola => '0',
            };
            let sign_char = match signal.sign {
                Signess::Signed => '-',
                Signess::Unsigned => '+',
            };
            let factor = format_f64(signal.factor);
            let offset = format_f64(signal.offset);
            let min = format_f64(signal.min);
            let max = format_f64(signal.max);
            let unit = escape_dbc_string(&signal.unit_of_measurement);
            let receivers_field = if signal.receiver_nodes.is_empty() {
                VECTOR_XXX.to_string()
            } else {
                signal.receiver_nodes.join(",")
            };

            write_fmt(
                out,
                format_args!(
                    "\tSG_ {} : {}|{}@{}{} ({},{}) [{}|{}] \"{}\"  {}\n",
                    signal.name,
                    signal.bit_start,
                    signal.bit_length,
                    endian,
                    sign_char,
                    factor,
                    offset,
                    min,
                    max,
                    unit,
                    receivers_field
                ),
            )?;
        }

        out.push('\n');
    }

    Ok(())
}

/// `BO_TX_BU_` overrides, only for messages carrying alternate transmitters.
fn write_bo_tx_bu(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (id, message) in net.iter_messages() {
        if message.message_transmitters.is_empty() {
            continue;
        }
        write_fmt(
            out,
            format_args!(
                "BO_TX_BU_ {} : {};\n",
                id,
                message.message_transmitters.join(",")
            ),
        )?;
    }

    Ok(())
}

fn write_environment_variables(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (name, ev) in net.iter_env_vars() {
        write_fmt(out, format_args!("EV_ {}: {}", name, env_var_type_code(ev)))?;
        write_fmt(
            out,
            format_args!(
                " [{}|{}] \"{}\" {} {} DUMMY_NODE_VECTOR{}",
                format_f64(ev.min),
                format_f64(ev.max),
                escape_dbc_string(&ev.unit_of_measurement),
                format_f64(ev.initial_value),
                ev.ev_id,
                access_type_code(ev.access_type)
            ),
        )?;
        let nodes_field = if ev.access_nodes.is_empty() {
            VECTOR_XXX.to_string()
        } else {
            ev.access_nodes.join(",")
        };
        write_fmt(out, format_args!(" {};\n", nodes_field))?;
    }

    for (name, ev) in net.iter_env_vars() {
        if matches!(ev.var_type, EnvVarType::Data) {
            write_fmt(
                out,
                format_args!("ENVVAR_DATA_ {} : {};\n", name, ev.data_size),
            )?;
        }
    }

    Ok(())
}

/// `SGTYPE_` lines for value tables that do carry a signal type.
fn write_signal_types(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (_, table) in net.iter_value_tables() {
        if let Some(st) = table.signal_type.as_ref() {
            write_fmt(out, format_args!("{}\n", format_signal_type(st)))?;
        }
    }

    Ok(())
}

/// Comments in strict order: network, nodes, messages, signals, environment
/// variables. Empty comments are skipped entirely.
fn write_comments(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    if !net.comment.is_empty() {
        let comment = escape_dbc_string(&net.comment);
        write_fmt(out, format_args!("CM_ \"{}\";\n", comment))?;
    }

    for (name, node) in net.iter_nodes() {
        if node.comment.is_empty() {
            continue;
        }
        let comment = escape_dbc_string(&node.comment);
        write_fmt(out, format_args!("CM_ BU_ {} \"{}\";\n", name, comment))?;
    }

    for (id, message) in net.iter_messages() {
        if message.comment.is_empty() {
            continue;
        }
        let comment = escape_dbc_string(&message.comment);
        write_fmt(out, format_args!("CM_ BO_ {} \"{}\";\n", id, comment))?;
    }

    for (id, message) in net.iter_messages() {
        for (sig_name, signal) in message.iter_signals() {
            if signal.comment.is_empty() {
                continue;
            }
            let comment = escape_dbc_string(&signal.comment);
            write_fmt(
                out,
                format_args!("CM_ SG_ {} {} \"{}\";\n", id, sig_name, comment),
            )?;
        }
    }

    for (name, ev) in net.iter_env_vars() {
        if ev.comment.is_empty() {
            continue;
        }
        let comment = escape_dbc_string(&ev.comment);
        write_fmt(out, format_args!("CM_ EV_ {} \"{}\";\n", name, comment))?;
    }

    Ok(())
}

fn write_attribute_definitions(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (name, def) in net.iter_attribute_definitions() {
        let signature = format_attribute_def(&def.value_type);
        write_fmt(
            out,
            format_args!(
                "BA_DEF_ {}\"{}\" {};\n",
                attr_object_tag(def.object_type),
                name,
                signature
            ),
        )?;
    }

    Ok(())
}

fn write_attribute_defaults(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (name, value) in &net.attribute_defaults {
        let def = net.get_attribute_definition_by_name(name);
        let value_str = format_attribute_value(value, def);
        write_fmt(
            out,
            format_args!("BA_DEF_DEF_ \"{}\" {};\n", name, value_str),
        )?;
    }

    Ok(())
}

/// `BA_` assignments for the network, then nodes, messages, signals and
/// environment variables, in that fixed order.
fn write_attribute_values(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (name, value) in &net.attributes {
        let def = net.get_attribute_definition_by_name(name);
        let value_str = format_attribute_value(value, def);
        write_fmt(out, format_args!("BA_ \"{}\" {};\n", name, value_str))?;
    }

    for (node_name, node) in net.iter_nodes() {
        for (name, value) in &node.attributes {
            let def = net.get_attribute_definition_by_name(name);
            let value_str = format_attribute_value(value, def);
            write_fmt(
                out,
                format_args!("BA_ \"{}\" BU_ {} {};\n", name, node_name, value_str),
            )?;
        }
    }

    for (id, message) in net.iter_messages() {
        for (name, value) in &message.attributes {
            let def = net.get_attribute_definition_by_name(name);
            let value_str = format_attribute_value(value, def);
            write_fmt(
                out,
                format_args!("BA_ \"{}\" BO_ {} {};\n", name, id, value_str),
            )?;
        }
    }

    for (id, message) in net.iter_messages() {
        for (sig_name, signal) in message.iter_signals() {
            for (name, value) in &signal.attributes {
                let def = net.get_attribute_definition_by_name(name);
                let value_str = format_attribute_value(value, def);
                write_fmt(
                    out,
                    format_args!("BA_ \"{}\" SG_ {} {} {};\n", name, id, sig_name, value_str),
                )?;
            }
        }
    }

    for (ev_name, ev) in net.iter_env_vars() {
        for (name, value) in &ev.attributes {
            let def = net.get_attribute_definition_by_name(name);
            let value_str = format_attribute_value(value, def);
            write_fmt(
                out,
                format_args!("BA_ \"{}\" EV_ {} {};\n", name, ev_name, value_str),
            )?;
        }
    }

    Ok(())
}

/// `VAL_` blocks: signal value descriptions first, then environment-variable
/// ones. Empty maps emit nothing.
fn write_value_descriptions(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (id, message) in net.iter_messages() {
        for (sig_name, signal) in message.iter_signals() {
            if signal.value_descriptions.is_empty() {
                continue;
            }
            write_fmt(out, format_args!("VAL_ {} {}", id, sig_name))?;
            for (value, description) in &signal.value_descriptions {
                let desc = escape_dbc_string(description);
                write_fmt(out, format_args!(" {} \"{}\"", value, desc))?;
            }
            out.push_str(";\n");
        }
    }

    for (name, ev) in net.iter_env_vars() {
        if ev.value_descriptions.is_empty() {
            continue;
        }
        write_fmt(out, format_args!("VAL_ {}", name))?;
        for (value, description) in &ev.value_descriptions {
            let desc = escape_dbc_string(description);
            write_fmt(out, format_args!(" {} \"{}\"", value, desc))?;
        }
        out.push_str(";\n");
    }

    Ok(())
}

/// `SIG_VALTYPE_` lines; `Integer` is the implicit default and is skipped.
fn write_sig_valtype(net: &Network, out: &mut String) -> Result<(), DbcSaveError> {
    for (id, message) in net.iter_messages() {
        for (sig_name, signal) in message.iter_signals() {
            let code = match signal.extended_value_type {
                ExtendedValueType::Integer => None,
                ExtendedValueType::Float => Some(1),
                ExtendedValueType::Double => Some(2),
            };
            if let Some(code) = code {
                write_fmt(
                    out,
                    format_args!("SIG_VALTYPE_ {} {} : {};\n", id, sig_name, code),
                )?;
            }
        }
    }

    Ok(())
}

fn format_signal_type(st: &SignalType) -> String {
    let endian = match st.byte_order {
        Endianness::Intel => '1',
        Endianness::Motorola => '0',
    };
    let sign_char = match st.sign {
        Signess::Signed => '-',
        Signess::Unsigned => '+',
    };
    format!(
        "SGTYPE_ {} : {}@{}{} ({},{}) [{}|{}] \"{}\" {}, {};",
        st.name,
        st.bit_length,
        endian,
        sign_char,
        format_f64(st.factor),
        format_f64(st.offset),
        format_f64(st.min),
        format_f64(st.max),
        escape_dbc_string(&st.unit_of_measurement),
        format_f64(st.default_value),
        st.value_table
    )
}

fn attr_object_tag(object_type: AttrObject) -> &'static str {
    match object_type {
        AttrObject::Network => "",
        AttrObject::Node => "BU_ ",
        AttrObject::Message => "BO_ ",
        AttrObject::Signal => "SG_ ",
        AttrObject::EnvironmentVariable => "EV_ ",
    }
}

fn format_attribute_def(value_type: &AttrValueType) -> String {
    match value_type {
        AttrValueType::Str => "STRING".to_string(),
        AttrValueType::Int { min, max } => format!("INT {} {}", min, max),
        AttrValueType::Hex { min, max } => format!("HEX {} {}", min, max),
        AttrValueType::Float { min, max } => {
            format!("FLOAT {} {}", format_f64(*min), format_f64(*max))
        }
        AttrValueType::Enum(values) => {
            let joined = values
                .iter()
                .map(|value| format!("\"{}\"", escape_dbc_string(value)))
                .collect::<Vec<_>>()
                .join(", ");
            format!("ENUM {}", joined)
        }
    }
}

fn format_attribute_value(value: &AttributeValue, def: Option<&AttributeDefinition>) -> String {
    match value {
        AttributeValue::Str(s) => format!("\"{}\"", escape_dbc_string(s)),
        AttributeValue::Int(v) => v.to_string(),
        AttributeValue::Hex(v) => v.to_string(),
        AttributeValue::Float(v) => format_f64(*v),
        AttributeValue::Enum(selected) => {
            if let Some(AttrValueType::Enum(values)) = def.map(|d| &d.value_type)
                && let Some(idx) = values.iter().position(|entry| entry == selected)
            {
                return idx.to_string();
            }
            format!("\"{}\"", escape_dbc_string(selected))
        }
    }
}

fn env_var_type_code(ev: &EnvironmentVariable) -> u64 {
    match ev.var_type {
        EnvVarType::Integer | EnvVarType::Data => 0,
        EnvVarType::Float => 1,
        EnvVarType::String => 2,
    }
}

fn access_type_code(access: AccessType) -> u64 {
    match access {
        AccessType::Unrestricted => 0,
        AccessType::Read => 1,
        AccessType::Write => 2,
        AccessType::ReadWrite => 3,
    }
}

fn format_f64(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let mut s = format!("{:.12}", value);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.push('0');
        }
        s
    }
}

fn escape_dbc_string(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn write_fmt(out: &mut String, args: fmt::Arguments<'_>) -> Result<(), DbcSaveError> {
    out.write_fmt(args).map_err(|_| DbcSaveError::Format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        message::Message, node::Node, signal::Signal, value_table::ValueTable,
    };

    fn sample_network() -> Network {
        let mut net = Network {
            version: "1.0.2".to_string(),
            comment: "Powertrain network".to_string(),
            ..Default::default()
        };
        net.new_symbols.insert("BO_TX_BU_".to_string());
        net.new_symbols.insert("SIG_VALTYPE_".to_string());

        net.nodes.insert(
            "Motor".to_string(),
            Node {
                name: "Motor".to_string(),
                comment: "Engine controller".to_string(),
                ..Default::default()
            },
        );
        net.nodes.insert(
            "Gateway".to_string(),
            Node {
                name: "Gateway".to_string(),
                ..Default::default()
            },
        );

        let mut msg = Message {
            id: 100,
            name: "Motor_01".to_string(),
            byte_length: 8,
            transmitter: "Motor".to_string(),
            comment: "engine speed".to_string(),
            ..Default::default()
        };
        let mut rpm = Signal {
            name: "RPM".to_string(),
            bit_start: 0,
            bit_length: 16,
            byte_order: Endianness::Motorola,
            sign: Signess::Unsigned,
            factor: 1.0,
            offset: 0.0,
            max: 65535.0,
            unit_of_measurement: "rpm".to_string(),
            receiver_nodes: vec!["Gateway".to_string()],
            comment: "crankshaft speed".to_string(),
            ..Default::default()
        };
        rpm.value_descriptions.insert(0, "Stopped".to_string());
        rpm.value_descriptions.insert(65535, "Error".to_string());
        msg.signals.insert("RPM".to_string(), rpm);
        net.messages.insert(100, msg);

        net
    }

    #[test]
    fn test_message_comment_position_and_uniqueness() {
        let text = serialize_network(&sample_network()).unwrap();

        let needle = "CM_ BO_ 100 \"engine speed\";";
        assert_eq!(text.matches(needle).count(), 1);

        let node_cm = text.find("CM_ BU_ Motor \"Engine controller\";").unwrap();
        let msg_cm = text.find(needle).unwrap();
        let sig_cm = text.find("CM_ SG_ 100 RPM \"crankshaft speed\";").unwrap();
        assert!(node_cm < msg_cm);
        assert!(msg_cm < sig_cm);
    }

    #[test]
    fn test_empty_comment_emits_nothing() {
        let net = sample_network();
        let text = serialize_network(&net).unwrap();
        // Gateway has no comment: no CM_ BU_ line for it.
        assert!(!text.contains("CM_ BU_ Gateway"));
        // Network comment is present exactly once.
        assert_eq!(text.matches("CM_ \"Powertrain network\";").count(), 1);
    }

    #[test]
    fn test_header_sections() {
        let net = sample_network();
        let text = serialize_network(&net).unwrap();
        assert!(text.starts_with("VERSION \"1.0.2\"\n"));
        assert!(text.contains("NS_ :\n\tBO_TX_BU_\n\tSIG_VALTYPE_\n"));
        assert!(text.contains("BS_:\n"));
        assert!(text.contains("BU_: Gateway Motor\n"));
    }

    #[test]
    fn test_bit_timing_line_when_set() {
        let mut net = sample_network();
        net.bit_timing.baudrate = 500000;
        net.bit_timing.btr1 = 1;
        net.bit_timing.btr2 = 10;
        let text = serialize_network(&net).unwrap();
        assert!(text.contains("BS_: 500000:1,10\n"));
    }

    #[test]
    fn test_message_and_signal_lines() {
        let text = serialize_network(&sample_network()).unwrap();
        assert!(text.contains("BO_ 100 Motor_01: 8 Motor\n"));
        assert!(text.contains("\tSG_ RPM : 0|16@0+ (1,0) [0|65535] \"rpm\"  Gateway\n"));
    }

    #[test]
    fn test_bo_tx_bu_only_with_alternates() {
        let mut net = sample_network();
        let text = serialize_network(&net).unwrap();
        assert!(!text.contains("BO_TX_BU_ 100"));

        net.get_message_by_id_mut(100)
            .unwrap()
            .message_transmitters = vec!["Motor".to_string(), "Backup_Motor".to_string()];
        let text = serialize_network(&net).unwrap();
        assert!(text.contains("BO_TX_BU_ 100 : Motor,Backup_Motor;\n"));
    }

    #[test]
    fn test_sig_valtype_gating() {
        let mut net = sample_network();
        let text = serialize_network(&net).unwrap();
        // The NS_ token is always there; no SIG_VALTYPE_ *line* for an
        // Integer-typed signal.
        assert!(text.contains("\tSIG_VALTYPE_\n"));
        assert!(!text.contains("SIG_VALTYPE_ 100"));

        net.get_message_by_id_mut(100)
            .unwrap()
            .get_signal_by_name_mut("RPM")
            .unwrap()
            .extended_value_type = ExtendedValueType::Float;
        let text = serialize_network(&net).unwrap();
        assert!(text.contains("SIG_VALTYPE_ 100 RPM : 1;\n"));

        net.get_message_by_id_mut(100)
            .unwrap()
            .get_signal_by_name_mut("RPM")
            .unwrap()
            .extended_value_type = ExtendedValueType::Double;
        let text = serialize_network(&net).unwrap();
        assert!(text.contains("SIG_VALTYPE_ 100 RPM : 2;\n"));
    }

    #[test]
    fn test_value_table_split_by_signal_type() {
        let mut net = sample_network();
        let mut plain = ValueTable {
            name: "OnOff".to_string(),
            ..Default::default()
        };
        plain.value_descriptions.insert(0, "Off".to_string());
        plain.value_descriptions.insert(1, "On".to_string());
        net.value_tables.insert("OnOff".to_string(), plain);

        let typed = ValueTable {
            name: "SpeedType".to_string(),
            signal_type: Some(SignalType {
                name: "SpeedType".to_string(),
                bit_length: 16,
                byte_order: Endianness::Intel,
                sign: Signess::Unsigned,
                factor: 0.25,
                offset: 0.0,
                min: 0.0,
                max: 16383.75,
                unit_of_measurement: "km/h".to_string(),
                default_value: 0.0,
                value_table: "SpeedType".to_string(),
            }),
            ..Default::default()
        };
        net.value_tables.insert("SpeedType".to_string(), typed);

        let text = serialize_network(&net).unwrap();
        assert!(text.contains("VAL_TABLE_ OnOff 0 \"Off\" 1 \"On\";\n"));
        assert!(!text.contains("VAL_TABLE_ SpeedType"));
        assert!(text.contains(
            "SGTYPE_ SpeedType : 16@1+ (0.25,0) [0|16383.75] \"km/h\" 0, SpeedType;\n"
        ));
    }

    #[test]
    fn test_environment_variables() {
        let mut net = sample_network();
        let mut ev = EnvironmentVariable {
            name: "EngineTemp".to_string(),
            var_type: EnvVarType::Float,
            min: -40.0,
            max: 150.0,
            unit_of_measurement: "degC".to_string(),
            initial_value: 20.0,
            ev_id: 7,
            access_type: AccessType::ReadWrite,
            access_nodes: vec!["Gateway".to_string()],
            comment: "coolant probe".to_string(),
            ..Default::default()
        };
        ev.value_descriptions.insert(-40, "Underflow".to_string());
        net.environment_variables
            .insert("EngineTemp".to_string(), ev);

        let blob = EnvironmentVariable {
            name: "CalibBlob".to_string(),
            var_type: EnvVarType::Data,
            data_size: 64,
            ..Default::default()
        };
        net.environment_variables
            .insert("CalibBlob".to_string(), blob);

        let text = serialize_network(&net).unwrap();
        assert!(text.contains(
            "EV_ EngineTemp: 1 [-40|150] \"degC\" 20 7 DUMMY_NODE_VECTOR3 Gateway;\n"
        ));
        assert!(text.contains("EV_ CalibBlob: 0 [0|0] \"\" 0 0 DUMMY_NODE_VECTOR0 Vector__XXX;\n"));
        // Data size only for the Data-typed variable.
        assert!(text.contains("ENVVAR_DATA_ CalibBlob : 64;\n"));
        assert!(!text.contains("ENVVAR_DATA_ EngineTemp"));
        assert!(text.contains("CM_ EV_ EngineTemp \"coolant probe\";\n"));
        assert!(text.contains("VAL_ EngineTemp -40 \"Underflow\";\n"));
    }

    #[test]
    fn test_attributes_block() {
        let mut net = sample_network();
        net.attribute_definitions.insert(
            "BusSpeed".to_string(),
            AttributeDefinition {
                name: "BusSpeed".to_string(),
                object_type: AttrObject::Network,
                value_type: AttrValueType::Int {
                    min: 0,
                    max: 1000000,
                },
            },
        );
        net.attribute_definitions.insert(
            "GenMsgSendType".to_string(),
            AttributeDefinition {
                name: "GenMsgSendType".to_string(),
                object_type: AttrObject::Message,
                value_type: AttrValueType::Enum(vec![
                    "Cyclic".to_string(),
                    "IfActive".to_string(),
                ]),
            },
        );
        net.attribute_defaults.insert(
            "GenMsgSendType".to_string(),
            AttributeValue::Enum("Cyclic".to_string()),
        );
        net.attributes
            .insert("BusSpeed".to_string(), AttributeValue::Int(500000));
        net.get_message_by_id_mut(100).unwrap().attributes.insert(
            "GenMsgSendType".to_string(),
            AttributeValue::Enum("IfActive".to_string()),
        );

        let text = serialize_network(&net).unwrap();
        assert!(text.contains("BA_DEF_ \"BusSpeed\" INT 0 1000000;\n"));
        assert!(text.contains("BA_DEF_ BO_ \"GenMsgSendType\" ENUM \"Cyclic\", \"IfActive\";\n"));
        // Enum default resolves to its index through the definition.
        assert!(text.contains("BA_DEF_DEF_ \"GenMsgSendType\" 0;\n"));
        assert!(text.contains("BA_ \"BusSpeed\" 500000;\n"));
        assert!(text.contains("BA_ \"GenMsgSendType\" BO_ 100 1;\n"));
    }

    #[test]
    fn test_value_descriptions_for_signals() {
        let text = serialize_network(&sample_network()).unwrap();
        assert!(text.contains("VAL_ 100 RPM 0 \"Stopped\" 65535 \"Error\";\n"));
    }

    #[test]
    fn test_empty_network_still_has_skeleton() {
        let text = serialize_network(&Network::default()).unwrap();
        assert!(text.starts_with("VERSION \"\"\n"));
        assert!(text.contains("NS_ :\n"));
        assert!(text.contains("BS_:\n"));
        assert!(text.contains("BU_:\n"));
        assert!(!text.contains("BO_ "));
        assert!(!text.contains("CM_"));
    }

    #[test]
    fn test_string_escaping() {
        let mut net = sample_network();
        net.comment = "line1\nwith \"quotes\"".to_string();
        let text = serialize_network(&net).unwrap();
        assert!(text.contains("CM_ \"line1\\nwith \\\"quotes\\\"\";\n"));
    }

    #[test]
    fn test_save_to_file_rejects_wrong_extension() {
        let net = Network::default();
        let err = save_to_file("/tmp/not_a_dbc.txt", &net).unwrap_err();
        assert!(matches!(err, DbcSaveError::InvalidExtension { .. }));
    }

    #[test]
    fn test_save_to_file_round_trips_bytes() {
        let net = sample_network();
        let path = std::env::temp_dir().join("can_network_save_test.dbc");
        let path_str = path.to_str().unwrap();
        save_to_file(path_str, &net).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, serialize_network(&net).unwrap());
        std::fs::remove_file(&path).ok();
    }
}
