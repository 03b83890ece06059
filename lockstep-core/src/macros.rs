/// Implement [`Reflect`](crate::Reflect) for a struct or enum.
///
/// The macro must be invoked where the fields are visible. Generic types are
/// not supported; implement `Reflect` by hand for those.
///
/// ```
/// use lockstep_core::reflect;
///
/// struct Point {
///     x: i64,
///     y: i64,
/// }
/// reflect!(Point { x, y });
///
/// struct Meters(f64);
/// reflect!(Meters(0));
///
/// struct Marker;
/// reflect!(Marker);
///
/// enum Shape {
///     Circle { r: f64 },
///     Square(f64),
///     Empty,
/// }
/// reflect!(enum Shape {
///     Circle { r: f64 },
///     Square(side: f64),
///     Empty,
/// });
/// ```
///
/// Enum payloads are written with their types. Tuple variants name each
/// binding; the names are only used to destructure the variant.
#[macro_export]
macro_rules! reflect {
    (enum $name:ident {
        $($variant:ident
            $({ $($sf:ident : $st:ty),* $(,)? })?
            $(( $($tf:ident : $tt:ty),* $(,)? ))?
        ),* $(,)?
    }) => {
        impl $crate::Reflect for $name {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::builder::<$name>(stringify!($name))
                    .def($crate::Def::Enum($crate::EnumDef {
                        variants: &const {
                            [$($crate::reflect!(@variant $variant
                                $({ $($sf : $st),* })?
                                $(( $($tf : $tt),* ))?
                            )),*]
                        },
                    }))
                    .build()
            };

            fn reflect(&self, cx: &mut $crate::Reflector) -> $crate::Value {
                let (variant, fields): (&str, ::std::vec::Vec<$crate::Value>) = match self {
                    $($crate::reflect!(@pattern $name $variant
                        $({ $($sf : $st),* })?
                        $(( $($tf : $tt),* ))?
                    ) => (
                        stringify!($variant),
                        $crate::reflect!(@values cx
                            $({ $($sf : $st),* })?
                            $(( $($tf : $tt),* ))?
                        ),
                    ),)*
                };
                $crate::Value::variant(Self::SHAPE, variant, fields)
            }
        }
    };

    (@variant $variant:ident) => {
        $crate::Variant {
            name: stringify!($variant),
            kind: $crate::StructKind::Unit,
            fields: &[],
        }
    };
    (@variant $variant:ident { $($f:ident : $t:ty),* }) => {
        $crate::Variant {
            name: stringify!($variant),
            kind: $crate::StructKind::Struct,
            fields: &const {
                [$($crate::Field {
                    name: stringify!($f),
                    shape: || <$t as $crate::Reflect>::SHAPE,
                }),*]
            },
        }
    };
    (@variant $variant:ident ( $($f:ident : $t:ty),* )) => {
        $crate::Variant {
            name: stringify!($variant),
            kind: $crate::StructKind::TupleStruct,
            fields: &const {
                $crate::positional([$($crate::Field {
                    name: stringify!($f),
                    shape: || <$t as $crate::Reflect>::SHAPE,
                }),*])
            },
        }
    };

    (@pattern $name:ident $variant:ident) => { $name::$variant };
    (@pattern $name:ident $variant:ident { $($f:ident : $t:ty),* }) => {
        $name::$variant { $($f),* }
    };
    (@pattern $name:ident $variant:ident ( $($f:ident : $t:ty),* )) => {
        $name::$variant ( $($f),* )
    };

    (@values $cx:ident) => { ::std::vec::Vec::new() };
    (@values $cx:ident { $($f:ident : $t:ty),* }) => {
        ::std::vec![$($crate::Reflect::reflect($f, $cx)),*]
    };
    (@values $cx:ident ( $($f:ident : $t:ty),* )) => {
        ::std::vec![$($crate::Reflect::reflect($f, $cx)),*]
    };

    ($name:ident { $($field:ident),* $(,)? }) => {
        impl $crate::Reflect for $name {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::builder::<$name>(stringify!($name))
                    .def($crate::Def::Struct($crate::StructDef {
                        kind: $crate::StructKind::Struct,
                        fields: &const {
                            [$($crate::Field {
                                name: stringify!($field),
                                shape: || $crate::shape_of_field::<$name, _>(|s| &s.$field),
                            }),*]
                        },
                    }))
                    .build()
            };

            fn reflect(&self, cx: &mut $crate::Reflector) -> $crate::Value {
                $crate::Value::new(
                    Self::SHAPE,
                    $crate::Data::Struct(::std::vec![
                        $($crate::Reflect::reflect(&self.$field, cx)),*
                    ]),
                )
            }
        }
    };

    ($name:ident ( $($idx:tt),* $(,)? )) => {
        impl $crate::Reflect for $name {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::builder::<$name>(stringify!($name))
                    .def($crate::Def::Struct($crate::StructDef {
                        kind: $crate::StructKind::TupleStruct,
                        fields: &const {
                            [$($crate::Field {
                                name: stringify!($idx),
                                shape: || $crate::shape_of_field::<$name, _>(|s| &s.$idx),
                            }),*]
                        },
                    }))
                    .build()
            };

            fn reflect(&self, cx: &mut $crate::Reflector) -> $crate::Value {
                $crate::Value::new(
                    Self::SHAPE,
                    $crate::Data::Struct(::std::vec![
                        $($crate::Reflect::reflect(&self.$idx, cx)),*
                    ]),
                )
            }
        }
    };

    ($name:ident) => {
        impl $crate::Reflect for $name {
            const SHAPE: &'static $crate::Shape = &const {
                $crate::Shape::builder::<$name>(stringify!($name))
                    .def($crate::Def::Struct($crate::StructDef {
                        kind: $crate::StructKind::Unit,
                        fields: &[],
                    }))
                    .build()
            };

            fn reflect(&self, _cx: &mut $crate::Reflector) -> $crate::Value {
                $crate::Value::new(Self::SHAPE, $crate::Data::Struct(::std::vec::Vec::new()))
            }
        }
    };
}
