/// Declares a closed set of extensions together with its enabled-extension table.
///
/// Generates:
/// - the extension enum, with its exact Vulkan name and a lookup from that name;
/// - a table type with one `bool` per extension, sized at compile time, that records which
///   extensions were negotiated.
///
/// ```
/// burst_vk::enum_impl! {
///     /// Extensions of a toy scope.
///     pub enum ToyExtension in ToyExtensionTable {
///         KhrSurface = "VK_KHR_surface",
///         ExtDebugUtils = "VK_EXT_debug_utils",
///     }
/// }
///
/// let mut table = ToyExtensionTable::new();
/// table.mark_enabled_many(["VK_EXT_debug_utils", "VK_FUTURE_thing"]);
/// assert!(table.is_enabled(ToyExtension::ExtDebugUtils));
/// assert!(!table.is_enabled(ToyExtension::KhrSurface));
/// ```
#[macro_export]
macro_rules! enum_impl {
    (
        $(#[$outer:meta])*
        $vis:vis enum $name:ident in $table:ident {
            $(
                $(#[$inner:meta])*
                $variant:ident = $ext:literal,
            )+
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $(
                $(#[$inner])*
                $variant,
            )+
        }

        impl $name {
            /// Every extension of this scope, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant, )+];

            /// Number of extensions this scope knows about.
            pub const COUNT: usize = $name::ALL.len();

            /// The exact Vulkan extension name.
            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => $ext, )+
                }
            }

            /// Exact, case-sensitive lookup by Vulkan extension name.
            pub fn from_name(name: &str) -> Option<Self> {
                $name::ALL.iter().copied().find(|ext| ext.name() == name)
            }

            #[inline]
            const fn slot(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        #[doc = concat!("Which [`", stringify!($name), "`]s were negotiated.")]
        ///
        /// Fixed size, one flag per known extension. Unknown names are ignored when marking.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis struct $table {
            enabled: [bool; $name::COUNT],
        }

        impl $table {
            /// A table with nothing enabled.
            pub const fn new() -> Self {
                Self {
                    enabled: [false; $name::COUNT],
                }
            }

            /// Builds a table from the names that were actually enabled.
            pub fn from_names<I, S>(names: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: AsRef<str>,
            {
                let mut table = Self::new();
                table.mark_enabled_many(names);
                table
            }

            /// Keeps the `wanted` extensions that appear in `available`, enabled.
            pub fn negotiate<I, S>(wanted: &[$name], available: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: AsRef<str>,
            {
                let offered = Self::from_names(available);
                let mut table = Self::new();
                for &ext in wanted {
                    if offered.is_enabled(ext) {
                        table.enable(ext);
                    } else {
                        $crate::extensions::log_unavailable(stringify!($table), ext.name());
                    }
                }
                table
            }

            /// Marks `name` as enabled if this scope knows it; unknown names are a no-op.
            pub fn mark_enabled(&mut self, name: &str) {
                match $name::from_name(name) {
                    Some(ext) => {
                        self.enable(ext);
                        $crate::extensions::log_marked(stringify!($table), name);
                    }
                    None => $crate::extensions::log_ignored(stringify!($table), name),
                }
            }

            /// [`mark_enabled`](Self::mark_enabled) for every name; order does not matter.
            pub fn mark_enabled_many<I, S>(&mut self, names: I)
            where
                I: IntoIterator<Item = S>,
                S: AsRef<str>,
            {
                for name in names {
                    self.mark_enabled(name.as_ref());
                }
            }

            #[inline]
            pub fn enable(&mut self, ext: $name) {
                self.enabled[ext.slot()] = true;
            }

            #[inline]
            pub fn is_enabled(&self, ext: $name) -> bool {
                self.enabled[ext.slot()]
            }

            /// Exact-name query; `false` for names this scope does not know.
            pub fn is_enabled_by_name(&self, name: &str) -> bool {
                $name::from_name(name).is_some_and(|ext| self.is_enabled(ext))
            }

            /// Enabled extensions, in declaration order.
            pub fn enabled(&self) -> impl Iterator<Item = $name> + '_ {
                $name::ALL.iter().copied().filter(|&ext| self.is_enabled(ext))
            }

            pub fn enabled_names(&self) -> Vec<&'static str> {
                self.enabled().map($name::name).collect()
            }

            pub fn count_enabled(&self) -> usize {
                self.enabled.iter().filter(|&&on| on).count()
            }

            /// Size of the table, the number of known extensions.
            pub const fn capacity(&self) -> usize {
                $name::COUNT
            }
        }

        impl Default for $table {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
