//! The 15 built-in effectors (`spec.md` §4.6).
//!
//! Dispatch mirrors the teacher's `emit_effect`: one enum, one `match`, no
//! registry of boxed trait objects — the effector set is fixed, target
//! implementations beyond the base transductor are out of scope
//! (`spec.md` §1, Non-goals), so there's nothing dynamic to plug in here.

use ribose_core::{EscapeRef, RefKind};

use super::effector::{EffectorContext, EffectorReturn};
use super::error::EffectorError;
use super::fields::FieldStore;

/// One of the 15 built-in effectors, resolved from its model name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Builtin {
    Select,
    Paste,
    Copy,
    Cut,
    Clear,
    Count,
    Signal,
    In,
    Out,
    Mark,
    Reset,
    Start,
    Shift,
    Stop,
    Pause,
}

impl Builtin {
    pub const ALL: [Builtin; 15] = [
        Builtin::Select,
        Builtin::Paste,
        Builtin::Copy,
        Builtin::Cut,
        Builtin::Clear,
        Builtin::Count,
        Builtin::Signal,
        Builtin::In,
        Builtin::Out,
        Builtin::Mark,
        Builtin::Reset,
        Builtin::Start,
        Builtin::Shift,
        Builtin::Stop,
        Builtin::Pause,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Select => "select",
            Builtin::Paste => "paste",
            Builtin::Copy => "copy",
            Builtin::Cut => "cut",
            Builtin::Clear => "clear",
            Builtin::Count => "count",
            Builtin::Signal => "signal",
            Builtin::In => "in",
            Builtin::Out => "out",
            Builtin::Mark => "mark",
            Builtin::Reset => "reset",
            Builtin::Start => "start",
            Builtin::Shift => "shift",
            Builtin::Stop => "stop",
            Builtin::Pause => "pause",
        }
    }

    pub fn from_name(name: &str) -> Option<Builtin> {
        Builtin::ALL.into_iter().find(|b| b.name() == name)
    }
}

fn single_arg<'a>(name: &str, args: &'a [Vec<u8>]) -> Result<&'a [u8], EffectorError> {
    match args {
        [one] => Ok(one.as_slice()),
        _ => Err(EffectorError::BadArgCount { effector: name.to_string(), expected: 1, got: args.len() }),
    }
}

fn utf8_arg<'a>(name: &str, bytes: &'a [u8], index: usize) -> Result<&'a str, EffectorError> {
    std::str::from_utf8(bytes).map_err(|_| EffectorError::InvalidUtf8 { effector: name.to_string(), index })
}

fn field_name_arg<'a>(name: &str, args: &'a [Vec<u8>]) -> Result<&'a str, EffectorError> {
    utf8_arg(name, single_arg(name, args)?, 0)
}

fn resolve_field(model: &ribose_model::Model, name: &str) -> Result<u16, EffectorError> {
    model.field_ordinal(name).ok_or_else(|| EffectorError::UnknownField(u16::MAX))
}

fn resolve_signal(model: &ribose_model::Model, name: &str) -> Option<u16> {
    match name {
        "nul" => return Some(ribose_core::SIG_NUL),
        "nil" => return Some(ribose_core::SIG_NIL),
        "eol" => return Some(ribose_core::SIG_EOL),
        "eos" => return Some(ribose_core::SIG_EOS),
        _ => {}
    }
    model
        .signal_names
        .iter()
        .position(|n| n == name)
        .map(|i| ribose_core::PREDEFINED_SIGNAL_COUNT + i as u16)
}

/// Resolve one `in`/`out` operand: a `~field` or `!signal` escape reference
/// resolves to the field's current content or the signal's wire encoding;
/// anything else is a literal byte string (`spec.md` §4.6).
fn resolve_operand(fields: &FieldStore, arg: &[u8]) -> Result<Vec<u8>, EffectorError> {
    if arg.len() == 4 && arg[0] == ribose_core::ESCAPE_PREFIX {
        if let Some(esc) = EscapeRef::from_bytes(arg.try_into().expect("length checked above")) {
            return match esc.kind {
                RefKind::Field => Ok(fields.get(esc.ordinal)?.as_bytes().to_vec()),
                RefKind::Signal | RefKind::Transducer => Ok(arg.to_vec()),
            };
        }
    }
    Ok(arg.to_vec())
}

fn resolve_operands(fields: &FieldStore, args: &[Vec<u8>]) -> Result<Vec<u8>, EffectorError> {
    if args.is_empty() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for arg in args {
        out.extend(resolve_operand(fields, arg)?);
    }
    Ok(out)
}

/// Invoke a built-in effector.
pub fn invoke(
    builtin: Builtin,
    ctx: &mut EffectorContext,
    args: &[Vec<u8>],
) -> Result<EffectorReturn, EffectorError> {
    match builtin {
        Builtin::Select => {
            // `select([~field]?)`: default to the anonymous field.
            let ordinal = match args {
                [] => 0,
                [_] => resolve_field(ctx.model, field_name_arg(builtin.name(), args)?)?,
                _ => return Err(EffectorError::BadArgCount { effector: builtin.name().into(), expected: 1, got: args.len() }),
            };
            ctx.fields.select(ordinal)?;
            Ok(EffectorReturn::NONE)
        }
        Builtin::Paste => {
            // `paste([bytes]?)`: append the literal operand, or the symbol
            // that fired this transition when no operand is given, to the
            // selected field.
            if args.is_empty() {
                if let Some(b) = ctx.current_symbol.as_byte() {
                    ctx.fields.append(&[b]);
                }
            } else {
                ctx.fields.append(&args.concat());
            }
            Ok(EffectorReturn::NONE)
        }
        Builtin::Copy => {
            // `copy([~field])`: append the selected field's content into
            // the named destination field, without clearing the selection.
            let field_name = field_name_arg(builtin.name(), args)?;
            let dst = resolve_field(ctx.model, field_name)?;
            ctx.fields.copy_into(dst)?;
            Ok(EffectorReturn::NONE)
        }
        Builtin::Cut => {
            // `cut([~field])`: same as `copy`, then clear the selection.
            let field_name = field_name_arg(builtin.name(), args)?;
            let dst = resolve_field(ctx.model, field_name)?;
            ctx.fields.cut_into(dst)?;
            Ok(EffectorReturn::NONE)
        }
        Builtin::Clear => {
            // `clear([~field | ~*]?)`: clear the selected field by default,
            // every field on `~*`, or one named field.
            match args {
                [] => ctx.fields.clear(),
                [one] if one.as_slice() == b"*" => ctx.fields.clear_all(),
                [one] => {
                    let field_name = utf8_arg(builtin.name(), one, 0)?;
                    let ordinal = resolve_field(ctx.model, field_name)?;
                    ctx.fields.clear_ordinal(ordinal)?;
                }
                _ => return Err(EffectorError::BadArgCount { effector: builtin.name().into(), expected: 1, got: args.len() }),
            }
            Ok(EffectorReturn::NONE)
        }
        Builtin::Count => {
            // `count([~counter-field, !signal])`: decrement the named
            // field's decimal scalar, write the result back, and emit the
            // named signal when it reaches zero. A non-numeric field is a
            // domain error: rather than raising, synthesize the `nul`
            // signal the way the `0` (domain-error marker) built-in does,
            // and leave the field untouched.
            let (field_bytes, signal_bytes) = match args {
                [f, s] => (f, s),
                _ => return Err(EffectorError::BadArgCount { effector: builtin.name().into(), expected: 2, got: args.len() }),
            };
            let field_name = utf8_arg(builtin.name(), field_bytes, 0)?;
            let signal_name = utf8_arg(builtin.name(), signal_bytes, 1)?;
            let ordinal = resolve_field(ctx.model, field_name)?;

            let current = match ctx.fields.get(ordinal)?.as_i64() {
                Ok(v) => v,
                Err(_) => {
                    ctx.requested_signal = Some(ribose_core::SIG_NUL);
                    return Ok(EffectorReturn::SIGNAL);
                }
            };
            let next = current - 1;
            ctx.fields.set_ordinal(ordinal, next.to_string().as_bytes())?;

            if next == 0 {
                let signal_ordinal = resolve_signal(ctx.model, signal_name)
                    .ok_or_else(|| EffectorError::UnknownSignal(signal_name.to_string()))?;
                ctx.requested_signal = Some(signal_ordinal);
                Ok(EffectorReturn::SIGNAL)
            } else {
                Ok(EffectorReturn::NONE)
            }
        }
        Builtin::Signal => {
            let signal_name = utf8_arg(builtin.name(), single_arg(builtin.name(), args)?, 0)?;
            let ordinal = resolve_signal(ctx.model, signal_name)
                .ok_or_else(|| EffectorError::UnknownSignal(signal_name.to_string()))?;
            ctx.requested_signal = Some(ordinal);
            Ok(EffectorReturn::SIGNAL)
        }
        Builtin::In => {
            let bytes = resolve_operands(ctx.fields, args)?;
            ctx.input.push(bytes);
            Ok(EffectorReturn::INPUT)
        }
        Builtin::Out => {
            if args.is_empty() {
                if let Some(b) = ctx.current_symbol.as_byte() {
                    ctx.output.push(b);
                }
            } else {
                ctx.output.extend(resolve_operands(ctx.fields, args)?);
            }
            Ok(EffectorReturn::NONE)
        }
        Builtin::Mark => {
            ctx.input.mark();
            Ok(EffectorReturn::NONE)
        }
        Builtin::Reset => {
            ctx.input.reset().map_err(|e| EffectorError::Custom(e.to_string()))?;
            Ok(EffectorReturn::NONE)
        }
        Builtin::Start => {
            // `start([@transducer])`: push the named transducer on top of
            // the stack; the current frame resumes when it stops.
            let name = utf8_arg(builtin.name(), single_arg(builtin.name(), args)?, 0)?;
            ctx.requested_transducer = Some(name.to_string());
            Ok(EffectorReturn::START)
        }
        Builtin::Shift => {
            // `shift([@transducer])`: replace the top frame in place (a
            // tail call); on an empty stack this behaves like `start`
            // (`spec.md` §9, resolved Open Question).
            let name = utf8_arg(builtin.name(), single_arg(builtin.name(), args)?, 0)?;
            ctx.shift_target = Some(name.to_string());
            Ok(EffectorReturn::NONE)
        }
        Builtin::Stop => Ok(EffectorReturn::STOP),
        Builtin::Pause => Ok(EffectorReturn::PAUSE),
    }
}
