#![allow(unused_crate_dependencies)]

use std::sync::Arc;

use filevars_config::Config;
use filevars_core::resolve::{TAB_SIZE, TRANSLATE_TABS_TO_SPACES};
use filevars_core::{Applied, Error, Event, FileVariables, LineEnding, MemoryBuffer, OptionValue};
use filevars_registry::StaticResources;
use pretty_assertions::assert_eq;

const PYTHON: &str = "Packages/Python/Python.sublime-syntax";
const RUBY: &str = "Packages/Ruby/Ruby.sublime-syntax";
const HTML: &str = "Packages/HTML/HTML.sublime-syntax";

fn plugin_with(config: Config) -> FileVariables {
	let lister = StaticResources::new([PYTHON, RUBY, HTML]);
	FileVariables::new(Arc::new(lister), Arc::new(config))
}

fn plugin() -> FileVariables {
	plugin_with(
		Config::parse(
			r#"
[mode_mappings]
django-html = "html"
foo = "bar"
"#,
		)
		.unwrap(),
	)
}

fn tail_config() -> Config {
	Config::parse("scan_tail = true").unwrap()
}

#[test]
fn no_declaration_is_a_no_op() {
	let plugin = plugin();
	let mut buffer = MemoryBuffer::new("import os\nprint('hi')\n");

	assert_eq!(plugin.handle(Event::Load, &mut buffer).unwrap(), None);
	assert!(buffer.is_untouched());
	assert!(!plugin.registry().is_built());
}

#[test]
fn full_declaration_applies_every_setting() {
	let plugin = plugin();
	let mut buffer = MemoryBuffer::new(
		"#!/usr/bin/env python\n# -*- mode: python; tab-width: 4; indent-tabs-mode: nil; coding: utf-8-dos -*-\n",
	);

	let resolution = plugin.handle(Event::Load, &mut buffer).unwrap().unwrap();
	assert_eq!(
		resolution.declaration,
		"mode: python; tab-width: 4; indent-tabs-mode: nil; coding: utf-8-dos"
	);
	assert_eq!(resolution.applied.len(), 4);
	assert_eq!(buffer.syntax(), Some(PYTHON));
	assert_eq!(buffer.setting(TAB_SIZE), Some(&OptionValue::Int(4)));
	assert_eq!(buffer.setting(TRANSLATE_TABS_TO_SPACES), Some(&OptionValue::Bool(true)));
	assert_eq!(buffer.line_ending(), Some(LineEnding::Windows));
}

#[test]
fn head_declaration_beats_tail_declaration() {
	let plugin = plugin_with(tail_config());
	let mut text = String::from("# -*- mode: python -*-\n");
	for _ in 0..20 {
		text.push_str("x = 1\n");
	}
	text.push_str("# -*- mode: ruby -*-");
	let mut buffer = MemoryBuffer::new(&text);

	plugin.handle(Event::Load, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), Some(PYTHON));
}

#[test]
fn tail_declaration_used_only_when_enabled() {
	let mut text = String::new();
	for _ in 0..20 {
		text.push_str("x = 1\n");
	}
	text.push_str("# -*- mode: ruby -*-\n");

	let mut buffer = MemoryBuffer::new(&text);
	plugin().handle(Event::Load, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), None);

	let mut buffer = MemoryBuffer::new(&text);
	plugin_with(tail_config()).handle(Event::Load, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), Some(RUBY));
}

#[test]
fn applying_twice_is_idempotent() {
	let plugin = plugin();
	let text = "// -*- mode: django-html; tab-width: 2; sublime-word_wrap: true -*-\n";

	let mut once = MemoryBuffer::new(text);
	plugin.handle(Event::Load, &mut once).unwrap();

	let mut twice = MemoryBuffer::new(text);
	plugin.handle(Event::Load, &mut twice).unwrap();
	plugin.handle(Event::PostSave, &mut twice).unwrap();

	assert_eq!(once, twice);
}

#[test]
fn alias_chain_resolves_to_concrete_resource() {
	let plugin = plugin();
	let mut buffer = MemoryBuffer::new("{# -*- mode: django-html -*- #}\n");
	plugin.handle(Event::Load, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), Some(HTML));
}

#[test]
fn user_alias_chain_follows_file_order() {
	let plugin = plugin_with(
		Config::parse(
			r#"
[user_mode_mappings]
web = "html"
templates = "web"
"#,
		)
		.unwrap(),
	);
	let mut buffer = MemoryBuffer::new("{# -*- mode: templates -*- #}\n");
	plugin.handle(Event::Load, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), Some(HTML));
}

#[test]
fn unresolved_alias_is_reported_as_unknown_mode() {
	let plugin = plugin_with(
		Config::parse(
			r#"
report_unknown_modes = true
[mode_mappings]
foo = "bar"
"#,
		)
		.unwrap(),
	);
	let mut buffer = MemoryBuffer::new("-*- mode: foo; tab-width: 3 -*-");

	let resolution = plugin.handle(Event::Load, &mut buffer).unwrap().unwrap();
	assert_eq!(buffer.syntax(), None);
	assert_eq!(buffer.setting(TAB_SIZE), Some(&OptionValue::Int(3)));
	assert_eq!(resolution.applied.len(), 1);
	assert_eq!(buffer.status_messages().len(), 1);
}

#[test]
fn bad_tab_width_is_an_error() {
	let plugin = plugin();
	let mut buffer = MemoryBuffer::new("-*- tab-width: four; mode: python -*-");

	let err = plugin.handle(Event::Load, &mut buffer).unwrap_err();
	assert!(matches!(err, Error::TabWidth { .. }));
	assert_eq!(buffer.syntax(), None);
}

#[test]
fn host_prefixed_keys_pass_through() {
	let plugin = plugin();
	let mut buffer =
		MemoryBuffer::new("-*- sublime-tab-width: 8; st-font_size: 10.5; sublime-text-rulers: 'x' -*-");

	let resolution = plugin.handle(Event::Load, &mut buffer).unwrap().unwrap();
	assert_eq!(
		resolution.applied,
		vec![
			Applied::Setting {
				key: "tab-width".into(),
				value: OptionValue::Int(8),
			},
			Applied::Setting {
				key: "font_size".into(),
				value: OptionValue::Float(10.5),
			},
			Applied::Setting {
				key: "rulers".into(),
				value: OptionValue::String("x".into()),
			},
		]
	);
	assert_eq!(buffer.setting(TAB_SIZE), None);
}

#[test]
fn declaration_without_components_does_not_stop_scan() {
	let plugin = plugin();
	let mut buffer = MemoryBuffer::new("/* -*- C -*- */\n/* -*- mode: ruby -*- */\n");

	let resolution = plugin.handle(Event::Load, &mut buffer).unwrap().unwrap();
	assert_eq!(resolution.declaration, "mode: ruby");
	assert_eq!(buffer.syntax(), Some(RUBY));
}

#[test]
fn only_first_parseable_declaration_is_processed() {
	let plugin = plugin();
	let mut buffer = MemoryBuffer::new("# -*- tab-width: 2 -*-\n# -*- mode: ruby -*-\n");

	plugin.handle(Event::Load, &mut buffer).unwrap();
	assert_eq!(buffer.setting(TAB_SIZE), Some(&OptionValue::Int(2)));
	assert_eq!(buffer.syntax(), None);
}

#[test]
fn non_applicable_buffers_are_ignored() {
	let plugin = plugin();
	let text = "# -*- mode: python -*-";

	let mut widget = MemoryBuffer::widget(text);
	assert_eq!(plugin.handle(Event::Load, &mut widget).unwrap(), None);
	assert!(widget.is_untouched());

	let mut scratch = MemoryBuffer::scratch(text);
	assert_eq!(plugin.handle(Event::PostSave, &mut scratch).unwrap(), None);
	assert!(scratch.is_untouched());
}

#[test]
fn activated_respects_config() {
	let text = "# -*- mode: python -*-";

	let mut buffer = MemoryBuffer::new(text);
	plugin().handle(Event::Activated, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), Some(PYTHON));

	let quiet = plugin_with(Config::parse("apply_on_activated = false").unwrap());
	let mut buffer = MemoryBuffer::new(text);
	assert_eq!(quiet.handle(Event::Activated, &mut buffer).unwrap(), None);
	assert!(buffer.is_untouched());
	quiet.handle(Event::PostSave, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), Some(PYTHON));
}

#[test]
fn edits_are_picked_up_on_save() {
	let plugin = plugin();
	let mut buffer = MemoryBuffer::new("# -*- mode: python -*-\n");
	plugin.handle(Event::Load, &mut buffer).unwrap();

	buffer.set_text("# -*- mode: ruby; coding: utf-8-mac -*-\n");
	plugin.handle(Event::PostSave, &mut buffer).unwrap();
	assert_eq!(buffer.syntax(), Some(RUBY));
	assert_eq!(buffer.line_ending(), Some(LineEnding::Cr));
}

#[test]
fn registry_is_shared_across_buffers() {
	let plugin = plugin();
	let mut first = MemoryBuffer::new("# -*- mode: python -*-");
	let mut second = MemoryBuffer::new("# -*- mode: ruby -*-");

	plugin.handle(Event::Load, &mut first).unwrap();
	let built = plugin.registry().ensure_built();
	plugin.handle(Event::Load, &mut second).unwrap();

	assert!(Arc::ptr_eq(&built, &plugin.registry().ensure_built()));
	assert_eq!(second.syntax(), Some(RUBY));
}
