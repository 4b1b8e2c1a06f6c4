//! ディスクリプタの読み込み元
//!
//! ファイル・文字列・メモリ上の値のいずれかから、パース前の `serde_json::Value` を得る。
//! `ecosystem.config.js` は `module.exports = { ... }` のオブジェクトリテラルだけを
//! 対象とし、YAML のフローマッピングとして読む。

use crate::error::{DescriptorError, Result};
use serde_json::Value;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// ディスクリプタのエンコーディング
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
    /// pm2 の ecosystem.config.js（オブジェクトリテラルのみ）
    EcosystemJs,
}

impl Format {
    /// 拡張子から判定
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            "js" | "cjs" | "mjs" => Some(Format::EcosystemJs),
            _ => None,
        }
    }

    /// 内容から判定
    pub fn detect(content: &str) -> Self {
        let trimmed = strip_leading_noise(content);
        if trimmed.starts_with("module.exports") || trimmed.starts_with("export default") {
            Format::EcosystemJs
        } else if trimmed.starts_with('{') || trimmed.starts_with('[') {
            Format::Json
        } else {
            Format::Yaml
        }
    }

    /// 文字列をパース
    pub fn parse(self, content: &str) -> Result<Value> {
        match self {
            Format::Json => Ok(serde_json::from_str(content)?),
            Format::Yaml => Ok(serde_yaml::from_str(content)?),
            Format::EcosystemJs => {
                let literal = ecosystem_js_to_yaml(content)?;
                debug!(literal = %literal, "Normalized ecosystem literal");
                Ok(serde_yaml::from_str(&literal)?)
            }
        }
    }
}

/// ディスクリプタの読み込み元
#[derive(Debug, Clone)]
pub enum DescriptorSource {
    /// ファイル（拡張子でフォーマットを判定）
    File(PathBuf),
    /// 文字列（フォーマット未指定の場合は内容から判定）
    Text {
        content: String,
        format: Option<Format>,
    },
    /// メモリ上の値
    Value(Value),
}

impl DescriptorSource {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        DescriptorSource::File(path.into())
    }

    pub fn text(content: impl Into<String>, format: Option<Format>) -> Self {
        DescriptorSource::Text {
            content: content.into(),
            format,
        }
    }

    /// パース前の値を読み込む
    #[instrument(skip(self))]
    pub fn read(&self) -> Result<Cow<'_, Value>> {
        match self {
            DescriptorSource::File(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::Io {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
                let format = Format::from_path(path).unwrap_or_else(|| Format::detect(&content));
                debug!(path = %path.display(), ?format, bytes = content.len(), "Read descriptor file");
                Ok(Cow::Owned(format.parse(&content)?))
            }
            DescriptorSource::Text { content, format } => {
                let format = format.unwrap_or_else(|| Format::detect(content));
                debug!(?format, bytes = content.len(), "Parsing descriptor text");
                Ok(Cow::Owned(format.parse(content)?))
            }
            DescriptorSource::Value(value) => Ok(Cow::Borrowed(value)),
        }
    }
}

impl From<PathBuf> for DescriptorSource {
    fn from(path: PathBuf) -> Self {
        DescriptorSource::File(path)
    }
}

impl From<&Path> for DescriptorSource {
    fn from(path: &Path) -> Self {
        DescriptorSource::File(path.to_path_buf())
    }
}

impl From<Value> for DescriptorSource {
    fn from(value: Value) -> Self {
        DescriptorSource::Value(value)
    }
}

/// 先頭の空白・コメント・'use strict' を読み飛ばす
fn strip_leading_noise(content: &str) -> &str {
    let mut rest = content.trim_start();
    loop {
        if let Some(after) = rest.strip_prefix("//") {
            rest = after.split_once('\n').map(|(_, r)| r).unwrap_or("").trim_start();
        } else if let Some(after) = rest.strip_prefix("/*") {
            rest = after.split_once("*/").map(|(_, r)| r).unwrap_or("").trim_start();
        } else if let Some(after) = rest
            .strip_prefix("'use strict'")
            .or_else(|| rest.strip_prefix("\"use strict\""))
        {
            rest = after.trim_start().trim_start_matches(';').trim_start();
        } else {
            return rest;
        }
    }
}

/// `module.exports = { ... }` をYAMLフローマッピングに変換
///
/// - コメントを除去
/// - 文字列リテラル（'...', "...", `...`）をJSON文字列に正規化
/// - `:` と `,` の後に空白を補う（`{name:"x"}` 対策）
/// - 文字列以外の値は `true` / `false` / `null` / 数値のみ許可（`undefined` は `null`）
/// - 閉じ括弧直前のカンマを除去
pub(crate) fn ecosystem_js_to_yaml(content: &str) -> Result<String> {
    let normalized = normalize_js(content)?;

    let literal = ["module.exports", "export default"]
        .iter()
        .find_map(|prefix| {
            let start = normalized.find(prefix)?;
            let rest = &normalized[start + prefix.len()..];
            if *prefix == "module.exports" {
                rest.trim_start().strip_prefix('=')
            } else {
                Some(rest)
            }
        })
        .ok_or_else(|| {
            DescriptorError::MalformedDescriptor(
                "module.exports = { ... } が見つかりません".to_string(),
            )
        })?;

    let literal = literal.trim().trim_end_matches(';').trim_end();
    if !literal.starts_with('{') {
        return Err(DescriptorError::MalformedDescriptor(
            "module.exports にはオブジェクトリテラルを指定してください".to_string(),
        ));
    }

    let literal = check_bare_identifiers(literal)?;
    Ok(strip_trailing_commas(&literal))
}

fn normalize_js(content: &str) -> Result<String> {
    let mut out = String::with_capacity(content.len() + content.len() / 8);
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' | '\'' | '`' => {
                let value = read_js_string(&mut chars, c)?;
                out.push_str(&serde_json::to_string(&value)?);
            }
            '/' if chars.peek() == Some(&'/') => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                let mut closed = false;
                for skipped in chars.by_ref() {
                    if prev == '*' && skipped == '/' {
                        closed = true;
                        break;
                    }
                    prev = skipped;
                }
                if !closed {
                    return Err(DescriptorError::MalformedDescriptor(
                        "閉じられていないコメントがあります".to_string(),
                    ));
                }
                out.push(' ');
            }
            ':' | ',' => {
                out.push(c);
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    Ok(out)
}

fn read_js_string(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    delimiter: char,
) -> Result<String> {
    let mut value = String::new();

    while let Some(c) = chars.next() {
        match c {
            c if c == delimiter => return Ok(value),
            '$' if delimiter == '`' && chars.peek() == Some(&'{') => {
                return Err(DescriptorError::MalformedDescriptor(
                    "テンプレートリテラル内の式（${...}）は未対応です".to_string(),
                ));
            }
            '\n' if delimiter != '`' => break,
            '\\' => {
                let Some(escaped) = chars.next() else { break };
                match escaped {
                    'n' => value.push('\n'),
                    't' => value.push('\t'),
                    'r' => value.push('\r'),
                    'b' => value.push('\u{8}'),
                    'f' => value.push('\u{c}'),
                    'v' => value.push('\u{b}'),
                    '0' => value.push('\0'),
                    '\n' => {}
                    'u' if chars.peek() == Some(&'{') => {
                        chars.next();
                        value.push(read_braced_hex_escape(chars)?);
                    }
                    'u' => value.push(read_hex_escape(chars, 4)?),
                    'x' => value.push(read_hex_escape(chars, 2)?),
                    other => value.push(other),
                }
            }
            _ => value.push(c),
        }
    }

    Err(DescriptorError::MalformedDescriptor(format!(
        "閉じられていない文字列リテラルがあります（{delimiter}）"
    )))
}

fn read_hex_escape(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    digits: usize,
) -> Result<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| hex.len() == digits)
        .and_then(char::from_u32)
        .ok_or_else(|| {
            DescriptorError::MalformedDescriptor(format!("不正なエスケープシーケンスです: {hex}"))
        })
}

/// `\u{...}`（1〜6桁）の読み取り。開き括弧は読み込み済み
fn read_braced_hex_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Result<char> {
    let mut hex = String::new();
    let mut closed = false;
    for c in chars.by_ref() {
        if c == '}' {
            closed = true;
            break;
        }
        hex.push(c);
        if hex.len() > 6 {
            break;
        }
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .filter(|_| closed && (1..=6).contains(&hex.len()))
        .and_then(char::from_u32)
        .ok_or_else(|| {
            DescriptorError::MalformedDescriptor(format!("不正なエスケープシーケンスです: {{{hex}"))
        })
}

/// JSON文字列の外側にある識別子を検査
///
/// キー（直後が `:`）以外で許すのは `true` / `false` / `null` のみ。
/// `undefined` は `null` に置き換える。`process.env.X` や関数呼び出しはエラー。
fn check_bare_identifiers(literal: &str) -> Result<String> {
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }

        if c == '"' {
            in_string = true;
            out.push(c);
            i += 1;
        } else if c.is_ascii_digit() {
            // 数値（1e3, 0x10 なども含めてそのまま渡す）
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '.') {
                out.push(chars[i]);
                i += 1;
            }
        } else if c.is_alphabetic() || c == '_' || c == '$' {
            let start = i;
            while i < chars.len()
                && (chars[i].is_alphanumeric() || matches!(chars[i], '_' | '$' | '.'))
            {
                i += 1;
            }
            let token: String = chars[start..i].iter().collect();
            let is_key = chars[i..].iter().find(|ch| !ch.is_whitespace()) == Some(&':');
            match token.as_str() {
                _ if is_key => out.push_str(&token),
                "true" | "false" | "null" => out.push_str(&token),
                "undefined" => out.push_str("null"),
                other => {
                    return Err(DescriptorError::MalformedDescriptor(format!(
                        "値に式 '{other}' は指定できません（文字列リテラルで記述してください）"
                    )));
                }
            }
        } else {
            out.push(c);
            i += 1;
        }
    }

    Ok(out)
}

/// JSON文字列の外側にある `,}` / `,]` のカンマを除去
fn strip_trailing_commas(literal: &str) -> String {
    let chars: Vec<char> = literal.chars().collect();
    let mut out = String::with_capacity(literal.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(c);
                }
            }
            _ => out.push(c),
        }
    }

    out
}
