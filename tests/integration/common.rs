use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestEnv {
    pub project_dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_dir: TempDir::new().expect("failed to create project_dir"),
        }
    }

    /// Build an xcbundle Command with cwd = project_dir.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("xcbundle"));
        cmd.current_dir(self.project_dir.path());
        cmd
    }

    /// Lays out `ios/App.xcodeproj/project.pbxproj` plus the app directory.
    pub fn write_project(&self) -> PathBuf {
        self.write_project_from(FIXTURE)
    }

    /// Same layout, but the descriptor has no resources build phase.
    pub fn write_project_without_resources(&self) -> PathBuf {
        self.write_project_from(FIXTURE_NO_RESOURCES)
    }

    fn write_project_from(&self, fixture: &str) -> PathBuf {
        let proj_dir = self.project_dir.path().join("ios/App.xcodeproj");
        fs::create_dir_all(&proj_dir).unwrap();
        fs::create_dir_all(self.project_dir.path().join("ios/App")).unwrap();
        let descriptor = proj_dir.join("project.pbxproj");
        fs::write(&descriptor, fixture).unwrap();
        descriptor
    }

    /// Creates the bundle file the way the JS bundler would.
    pub fn write_bundle(&self) -> PathBuf {
        let bundle = self.project_dir.path().join("ios/App/main.jsbundle");
        fs::create_dir_all(bundle.parent().unwrap()).unwrap();
        fs::write(&bundle, "var __bundle = {};\n").unwrap();
        bundle
    }

    pub fn descriptor_text(&self) -> String {
        fs::read_to_string(
            self.project_dir
                .path()
                .join("ios/App.xcodeproj/project.pbxproj"),
        )
        .unwrap()
    }

    /// Shorthand: register with explicit paths.
    pub fn register(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args([
                "register",
                "--project",
                "ios/App.xcodeproj/project.pbxproj",
                "--bundle",
                "ios/App/main.jsbundle",
            ])
            .assert()
    }

    /// Shorthand: check with explicit paths.
    pub fn check(&self) -> assert_cmd::assert::Assert {
        self.cmd()
            .args([
                "check",
                "--project",
                "ios/App.xcodeproj/project.pbxproj",
                "--bundle",
                "ios/App/main.jsbundle",
            ])
            .assert()
    }
}

/// A trimmed-down but structurally complete descriptor: one application
/// target with sources, frameworks, and resources phases, build
/// configurations included.
pub const FIXTURE: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {

/* Begin PBXBuildFile section */
		1A10000000000000000000A1 /* AppDelegate.swift in Sources */ = {isa = PBXBuildFile; fileRef = 2F20000000000000000000B1 /* AppDelegate.swift */; };
		1A10000000000000000000A2 /* Assets.xcassets in Resources */ = {isa = PBXBuildFile; fileRef = 2F20000000000000000000B2 /* Assets.xcassets */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		2F20000000000000000000B1 /* AppDelegate.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = AppDelegate.swift; sourceTree = "<group>"; };
		2F20000000000000000000B2 /* Assets.xcassets */ = {isa = PBXFileReference; lastKnownFileType = folder.assetcatalog; path = Assets.xcassets; sourceTree = "<group>"; };
		2F20000000000000000000B3 /* App.app */ = {isa = PBXFileReference; explicitFileType = wrapper.application; includeInIndex = 0; path = App.app; sourceTree = BUILT_PRODUCTS_DIR; };
/* End PBXFileReference section */

/* Begin PBXFrameworksBuildPhase section */
		3B30000000000000000000C1 /* Frameworks */ = {
			isa = PBXFrameworksBuildPhase;
			buildActionMask = 2147483647;
			files = (
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXFrameworksBuildPhase section */

/* Begin PBXGroup section */
		4D40000000000000000000D1 = {
			isa = PBXGroup;
			children = (
				4D40000000000000000000D2 /* App */,
				4D40000000000000000000D3 /* Products */,
			);
			sourceTree = "<group>";
		};
		4D40000000000000000000D2 /* App */ = {
			isa = PBXGroup;
			children = (
				2F20000000000000000000B1 /* AppDelegate.swift */,
				2F20000000000000000000B2 /* Assets.xcassets */,
			);
			path = App;
			sourceTree = "<group>";
		};
		4D40000000000000000000D3 /* Products */ = {
			isa = PBXGroup;
			children = (
				2F20000000000000000000B3 /* App.app */,
			);
			name = Products;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		5E50000000000000000000E1 /* App */ = {
			isa = PBXNativeTarget;
			buildConfigurationList = ADA0000000000000000000D2 /* Build configuration list for PBXNativeTarget "App" */;
			buildPhases = (
				8B80000000000000000000B1 /* Sources */,
				3B30000000000000000000C1 /* Frameworks */,
				7A70000000000000000000A1 /* Resources */,
			);
			buildRules = (
			);
			dependencies = (
			);
			name = App;
			productName = App;
			productReference = 2F20000000000000000000B3 /* App.app */;
			productType = "com.apple.product-type.application";
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		6F60000000000000000000F1 /* Project object */ = {
			isa = PBXProject;
			attributes = {
				LastUpgradeCheck = 1500;
			};
			buildConfigurationList = ADA0000000000000000000D1 /* Build configuration list for PBXProject "App" */;
			compatibilityVersion = "Xcode 14.0";
			developmentRegion = en;
			hasScannedForEncodings = 0;
			knownRegions = (
				en,
				Base,
			);
			mainGroup = 4D40000000000000000000D1;
			productRefGroup = 4D40000000000000000000D3 /* Products */;
			projectDirPath = "";
			projectRoot = "";
			targets = (
				5E50000000000000000000E1 /* App */,
			);
		};
/* End PBXProject section */

/* Begin PBXResourcesBuildPhase section */
		7A70000000000000000000A1 /* Resources */ = {
			isa = PBXResourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				1A10000000000000000000A2 /* Assets.xcassets in Resources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXResourcesBuildPhase section */

/* Begin PBXSourcesBuildPhase section */
		8B80000000000000000000B1 /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				1A10000000000000000000A1 /* AppDelegate.swift in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXSourcesBuildPhase section */

/* Begin XCBuildConfiguration section */
		9C90000000000000000000C1 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ALWAYS_SEARCH_USER_PATHS = NO;
				SDKROOT = iphoneos;
				SWIFT_OPTIMIZATION_LEVEL = "-Onone";
			};
			name = Debug;
		};
		9C90000000000000000000C2 /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				ALWAYS_SEARCH_USER_PATHS = NO;
				SDKROOT = iphoneos;
				VALIDATE_PRODUCT = YES;
			};
			name = Release;
		};
		9C90000000000000000000C3 /* Debug */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				CODE_SIGN_STYLE = Automatic;
				INFOPLIST_FILE = App/Info.plist;
				LD_RUNPATH_SEARCH_PATHS = (
					"$(inherited)",
					"@executable_path/Frameworks",
				);
				PRODUCT_BUNDLE_IDENTIFIER = com.example.App;
				PRODUCT_NAME = "$(TARGET_NAME)";
				SWIFT_VERSION = 5.0;
				TARGETED_DEVICE_FAMILY = "1,2";
			};
			name = Debug;
		};
		9C90000000000000000000C4 /* Release */ = {
			isa = XCBuildConfiguration;
			buildSettings = {
				CODE_SIGN_STYLE = Automatic;
				INFOPLIST_FILE = App/Info.plist;
				PRODUCT_BUNDLE_IDENTIFIER = com.example.App;
				PRODUCT_NAME = "$(TARGET_NAME)";
				SWIFT_VERSION = 5.0;
			};
			name = Release;
		};
/* End XCBuildConfiguration section */

/* Begin XCConfigurationList section */
		ADA0000000000000000000D1 /* Build configuration list for PBXProject "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				9C90000000000000000000C1 /* Debug */,
				9C90000000000000000000C2 /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
		ADA0000000000000000000D2 /* Build configuration list for PBXNativeTarget "App" */ = {
			isa = XCConfigurationList;
			buildConfigurations = (
				9C90000000000000000000C3 /* Debug */,
				9C90000000000000000000C4 /* Release */,
			);
			defaultConfigurationIsVisible = 0;
			defaultConfigurationName = Release;
		};
/* End XCConfigurationList section */
	};
	rootObject = 6F60000000000000000000F1 /* Project object */;
}
"#;

/// A descriptor whose only target carries no resources build phase.
pub const FIXTURE_NO_RESOURCES: &str = r#"// !$*UTF8*$!
{
	archiveVersion = 1;
	classes = {
	};
	objectVersion = 56;
	objects = {

/* Begin PBXBuildFile section */
		1A10000000000000000000A1 /* AppDelegate.swift in Sources */ = {isa = PBXBuildFile; fileRef = 2F20000000000000000000B1 /* AppDelegate.swift */; };
/* End PBXBuildFile section */

/* Begin PBXFileReference section */
		2F20000000000000000000B1 /* AppDelegate.swift */ = {isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = AppDelegate.swift; sourceTree = "<group>"; };
/* End PBXFileReference section */

/* Begin PBXGroup section */
		4D40000000000000000000D1 = {
			isa = PBXGroup;
			children = (
				4D40000000000000000000D2 /* App */,
			);
			sourceTree = "<group>";
		};
		4D40000000000000000000D2 /* App */ = {
			isa = PBXGroup;
			children = (
				2F20000000000000000000B1 /* AppDelegate.swift */,
			);
			path = App;
			sourceTree = "<group>";
		};
/* End PBXGroup section */

/* Begin PBXNativeTarget section */
		5E50000000000000000000E1 /* App */ = {
			isa = PBXNativeTarget;
			buildPhases = (
				8B80000000000000000000B1 /* Sources */,
			);
			name = App;
			productName = App;
			productType = "com.apple.product-type.application";
		};
/* End PBXNativeTarget section */

/* Begin PBXProject section */
		6F60000000000000000000F1 /* Project object */ = {
			isa = PBXProject;
			compatibilityVersion = "Xcode 14.0";
			developmentRegion = en;
			mainGroup = 4D40000000000000000000D1;
			projectDirPath = "";
			projectRoot = "";
			targets = (
				5E50000000000000000000E1 /* App */,
			);
		};
/* End PBXProject section */

/* Begin PBXSourcesBuildPhase section */
		8B80000000000000000000B1 /* Sources */ = {
			isa = PBXSourcesBuildPhase;
			buildActionMask = 2147483647;
			files = (
				1A10000000000000000000A1 /* AppDelegate.swift in Sources */,
			);
			runOnlyForDeploymentPostprocessing = 0;
		};
/* End PBXSourcesBuildPhase section */
	};
	rootObject = 6F60000000000000000000F1 /* Project object */;
}
"#;
