//! Default configuration values

/// Recipe file name inside a recipe directory
pub const RECIPE_FILE: &str = "recipe.toml";

/// License file name expected in the source folder
pub const LICENSE_FILE: &str = "LICENSE";

/// Subdirectory of the package folder receiving the license copy
pub const LICENSES_DIR: &str = "licenses";

/// Published package info file name inside a package folder
pub const PKGINFO_FILE: &str = "pkginfo.toml";

/// Environment variable overriding the pkgforge home directory
pub const HOME_ENV: &str = "PKGFORGE_HOME";

/// Directory under the home holding published packages
pub const PACKAGES_DIR: &str = "packages";

/// Default backend build-tool flavor
pub const DEFAULT_GENERATOR: &str = "Ninja";

/// Default build-system driver program
pub const DEFAULT_CMAKE_PROGRAM: &str = "cmake";

/// Generated toolchain file name (under the generators folder)
pub const TOOLCHAIN_FILE: &str = "toolchain.cmake";

/// Generated dependency file name (under the generators folder)
pub const DEPS_FILE: &str = "deps.cmake";

/// Subdirectory of the build folder receiving generated files
pub const GENERATORS_DIR: &str = "generators";

/// Default consumer search path published by library recipes
pub const DEFAULT_BUILDDIR: &str = "lib/cmake";
