//! Device file round trips and snapshot loading from JSON.

use ratbag_model::memory::MemoryAction;
use ratbag_model::{
    load_device, ActionType, ButtonAction, Color, LedMode, MemoryContext, NativeButton,
    NativeContext, NativeDevice, NativeLed, NativeProfile, NativeResolution, ProfileCapability,
    RatbagError, ResolutionCapability, SpecialAction,
};

const DEVICES: &str = r#"{
  "devices": [
    {
      "sysname": "hidraw3",
      "name": "SteelSeries Rival 310",
      "ids": { "bustype": "usb", "vendor_id": 4152, "product_id": 5690 },
      "firmware_version": "1.0.5",
      "profiles": [
        {
          "name": "Default",
          "active": true,
          "capabilities": ["set-default"],
          "report_rate": 1000,
          "report_rates": [125, 250, 500, 1000],
          "resolutions": [
            { "dpi_x": 800, "dpi_y": 800, "dpi_list": [400, 800, 1600],
              "active": true, "default": true },
            { "dpi_x": 1600, "dpi_y": 1600, "dpi_list": [400, 800, 1600],
              "capabilities": ["disable"] }
          ],
          "buttons": [
            { "action": { "type": "button", "button": 1 } },
            { "action": { "type": "special", "special": "resolution-cycle-up" } },
            { "action": { "type": "macro", "events": [
                { "kind": 1, "value": 30 }, { "kind": 2, "value": 30 }
            ] } }
          ],
          "leds": [
            { "mode": "on", "color": { "r": 255, "g": 0, "b": 0 } }
          ]
        },
        { "name": "Spare" }
      ]
    }
  ]
}"#;

#[test]
fn snapshot_from_json_device_file() {
    let ctx = MemoryContext::from_json(DEVICES).unwrap();
    assert_eq!(ctx.sysnames(), vec!["hidraw3".to_string()]);

    let snap = load_device(ctx.device("hidraw3").unwrap()).unwrap();
    assert_eq!(snap.ids.to_string(), "1038:163a");
    assert_eq!(snap.profiles.len(), 2);

    let active = snap.active_profile().unwrap();
    assert_eq!(active.index, 0);
    assert!(active.capabilities.contains(ProfileCapability::SetDefault));
    assert!(active.is_enabled);
    assert!(snap.profiles[1].is_enabled);

    assert!(active.resolutions[1]
        .capabilities
        .contains(ResolutionCapability::Disable));
    assert!(active.resolutions[0].capabilities.is_empty());

    assert_eq!(
        active.buttons[1].action,
        ButtonAction::Special {
            special: SpecialAction::ResolutionCycleUp
        }
    );
    assert_eq!(active.buttons[2].action, ButtonAction::Macro { events: 2 });

    let led = &active.leds[0];
    assert_eq!(led.mode, LedMode::On);
    assert_eq!(led.color, Color::new(255, 0, 0));
    assert_eq!(led.brightness, 255);
}

#[test]
fn edits_commit_and_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config").join("devices.json");

    let mut ctx = MemoryContext::from_json(DEVICES).unwrap();
    {
        let dev = ctx.device_mut("hidraw3").unwrap();
        assert!(!dev.is_dirty());
        let profile = dev.profile_mut(0).unwrap();
        profile.resolution_mut(0).unwrap().set_dpi(1600).unwrap();
        profile.button_mut(0).unwrap().set_key(30).unwrap();
        profile.led_mut(0).unwrap().set_mode(LedMode::Off as u32).unwrap();
        dev.commit().unwrap();
        assert!(!dev.is_dirty());
    }
    ctx.save(&path).unwrap();

    let reloaded = MemoryContext::load(&path).unwrap();
    assert_eq!(reloaded, ctx);
    let dev = reloaded.device("hidraw3").unwrap();
    assert_eq!(dev.commits, 1);
    let profile = dev.profile(0).unwrap();
    assert_eq!(profile.resolution(0).unwrap().dpi(), (1600, 1600));
    assert_eq!(profile.button(0).unwrap().action, MemoryAction::Key { key: 30 });
    assert_eq!(profile.led(0).unwrap().mode(), LedMode::Off as u32);
}

#[test]
fn rejected_values_leave_device_unchanged() {
    let mut ctx = MemoryContext::from_json(DEVICES).unwrap();
    let before = ctx.clone();
    let dev = ctx.device_mut("hidraw3").unwrap();
    let profile = dev.profile_mut(0).unwrap();

    assert!(matches!(
        profile.resolution_mut(0).unwrap().set_dpi(1200),
        Err(RatbagError::Value(_))
    ));
    assert!(matches!(
        profile.resolution_mut(0).unwrap().set_disabled(true),
        Err(RatbagError::Capability(_))
    ));
    assert!(matches!(profile.button(7), Err(RatbagError::NotFound(_))));
    assert_eq!(ctx.devices[0].profiles, before.devices[0].profiles);
}

#[test]
fn missing_device_file_is_empty_context() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = MemoryContext::load(dir.path().join("nope.json")).unwrap();
    assert!(ctx.sysnames().is_empty());
}

#[test]
fn malformed_device_file_is_system_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("devices.json");
    std::fs::write(&path, "{ \"devices\": [ { \"sysname\": 3 } ] }").unwrap();
    assert!(matches!(MemoryContext::load(&path), Err(RatbagError::System(_))));
}

#[test]
fn button_action_types_default_to_everything_but_unknown() {
    let ctx = MemoryContext::from_json(DEVICES).unwrap();
    let button = ctx
        .device("hidraw3")
        .unwrap()
        .profile(0)
        .unwrap()
        .button(0)
        .unwrap();
    for &t in ActionType::ALL {
        assert_eq!(button.has_action_type(t.raw()), t != ActionType::Unknown);
    }
}
