//! Integration tests for the `fluentconf convert` command.
//!
//! Each test runs the built binary against YAML files in a temp directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const SERVICES_YAML: &str = r"
imports:
  - { resource: packages/mailer.yaml }

parameters:
  app.admin_email: admin@example.com

services:
  App\Newsletter\NewsletterManager:
    arguments: ['@mailer', '%app.admin_email%']
    calls:
      - [setLogger, ['@logger']]
    tags:
      - { name: kernel.event_listener, event: kernel.request }

  App\Mailer\DecoratingMailer:
    decorates: App\Mailer\Mailer
    decoration_on_invalid: ignore

  App\Mailer\LegacyMailer:
    deprecated: { package: acme/mailer, version: '2.1', message: 'Use DecoratingMailer' }

  _instanceof:
    App\Handler\HandlerInterface:
      tags: [app.handler]
";

fn fluentconf(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fluentconf"))
        .args(args)
        .current_dir(cwd)
        .env_remove("FLUENTCONF_LOG")
        .output()
        .expect("Failed to run fluentconf")
}

#[test]
fn test_convert_writes_php_next_to_source() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let source = temp_dir.path().join("services.yaml");
    fs::write(&source, SERVICES_YAML).unwrap();

    let output = fluentconf(&["convert", "services.yaml"], temp_dir.path());
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let php = fs::read_to_string(temp_dir.path().join("services.php")).unwrap();
    let expected = r"<?php

declare(strict_types=1);

use Symfony\Component\DependencyInjection\Loader\Configurator\ContainerConfigurator;
use function Symfony\Component\DependencyInjection\Loader\Configurator\service;

return static function (ContainerConfigurator $containerConfigurator): void {
    $containerConfigurator->import(__DIR__ . '/packages/mailer.yaml');

    $parameters = $containerConfigurator->parameters();
    $parameters->set('app.admin_email', 'admin@example.com');

    $services = $containerConfigurator->services();
    $services->instanceof(\App\Handler\HandlerInterface::class)
        ->tag('app.handler');
    $services->set(\App\Newsletter\NewsletterManager::class)
        ->args([service('mailer'), '%app.admin_email%'])
        ->call('setLogger', [service('logger')])
        ->tag('kernel.event_listener', ['event' => 'kernel.request']);
    $services->set(\App\Mailer\DecoratingMailer::class)
        ->decorate(\App\Mailer\Mailer::class, null, 0, \Symfony\Component\DependencyInjection\ContainerInterface::IGNORE_ON_INVALID_REFERENCE);
    $services->set(\App\Mailer\LegacyMailer::class)
        ->deprecate('acme/mailer', '2.1', 'Use DecoratingMailer');
};
";
    assert_eq!(php, expected);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓"), "missing success line: {stdout}");
}

#[test]
fn test_convert_directory_into_output_dir() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join("config");
    fs::create_dir_all(config_dir.join("packages")).unwrap();
    fs::write(config_dir.join("services.yaml"), "services:\n  App\\Mailer: ~\n").unwrap();
    fs::write(
        config_dir.join("packages/mailer.yml"),
        "parameters:\n  mailer.dsn: 'smtp://localhost'\n",
    )
    .unwrap();
    fs::write(config_dir.join("routes.xml"), "<routes/>").unwrap();

    let output = fluentconf(&["convert", "config", "--output-dir", "out"], temp_dir.path());
    assert!(
        output.status.success(),
        "convert failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out_dir = temp_dir.path().join("out");
    assert!(out_dir.join("services.php").exists());
    assert!(out_dir.join("packages/mailer.php").exists());
    assert!(!out_dir.join("routes.php").exists());
}

#[test]
fn test_convert_to_stdout_with_known_types() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("services.yaml"),
        "services:\n  App\\Mailer: ~\n  App\\Transport: ~\n",
    )
    .unwrap();

    let output = fluentconf(
        &["convert", "services.yaml", "--stdout", "--known-type", "App\\Mailer"],
        temp_dir.path(),
    );
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("$services->set(\\App\\Mailer::class);"));
    assert!(stdout.contains("$services->set('App\\\\Transport');"));
    assert!(!temp_dir.path().join("services.php").exists());
}

#[test]
fn test_convert_uses_settings_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("fluentconf.toml"), "anchor_paths = false\n").unwrap();
    fs::write(
        temp_dir.path().join("services.yaml"),
        "imports:\n  - { resource: other.yaml }\n",
    )
    .unwrap();

    let output = fluentconf(&["convert", "services.yaml", "--stdout"], temp_dir.path());
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("$containerConfigurator->import('other.yaml');"));
}

#[test]
fn test_convert_failure_exits_nonzero() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        temp_dir.path().join("services.yaml"),
        "services:\n  App\\Mailer:\n    foo_bar: 1\n",
    )
    .unwrap();

    let output = fluentconf(&["convert", "services.yaml"], temp_dir.path());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unexpected key 'foo_bar' in service options"), "{stderr}");
    assert!(!temp_dir.path().join("services.php").exists());
}

#[test]
fn test_convert_missing_input() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let output = fluentconf(&["convert", "nope.yaml"], temp_dir.path());
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Input not found"));
}
