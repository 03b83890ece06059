use core::fmt;
use core::hash::BuildHasher;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

use crate::{ArrayDef, Def, ListDef, MapDef, Reflect, Reflector, Shape, Value};

impl<T: Reflect, const N: usize> Reflect for [T; N] {
    const SHAPE: &'static Shape = &const {
        fn type_name<T: Reflect, const N: usize>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "[{}; {N}]", T::SHAPE)
        }

        Shape::builder::<[T; N]>("array")
            .type_name(type_name::<T, N>)
            .def(Def::Array(ArrayDef { t: T::SHAPE, n: N }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        let elements = self.iter().map(|e| e.reflect(cx)).collect();
        Value::new(Self::SHAPE, crate::Data::Array(elements))
    }
}

impl<T: Reflect> Reflect for Vec<T> {
    const SHAPE: &'static Shape = &const {
        fn type_name<T: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Vec<{}>", T::SHAPE)
        }

        Shape::builder::<Vec<T>>("Vec")
            .type_name(type_name::<T>)
            .def(Def::List(ListDef { t: T::SHAPE }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        cx.shared(Self::SHAPE, self, |cx| {
            let elements = self.iter().map(|e| e.reflect(cx)).collect();
            Value::list(Self::SHAPE, elements)
        })
    }
}

impl<T: Reflect> Reflect for VecDeque<T> {
    const SHAPE: &'static Shape = &const {
        fn type_name<T: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "VecDeque<{}>", T::SHAPE)
        }

        Shape::builder::<VecDeque<T>>("VecDeque")
            .type_name(type_name::<T>)
            .def(Def::List(ListDef { t: T::SHAPE }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        cx.shared(Self::SHAPE, self, |cx| {
            let elements = self.iter().map(|e| e.reflect(cx)).collect();
            Value::list(Self::SHAPE, elements)
        })
    }
}

impl<K: Reflect, V: Reflect, S: BuildHasher + 'static> Reflect for HashMap<K, V, S> {
    const SHAPE: &'static Shape = &const {
        fn type_name<K: Reflect, V: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "HashMap<{}, {}>", K::SHAPE, V::SHAPE)
        }

        Shape::builder::<HashMap<K, V, S>>("HashMap")
            .type_name(type_name::<K, V>)
            .def(Def::Map(MapDef {
                k: K::SHAPE,
                v: V::SHAPE,
                set: false,
            }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        cx.shared(Self::SHAPE, self, |cx| {
            let entries = self
                .iter()
                .map(|(k, v)| (k.reflect(cx), v.reflect(cx)))
                .collect();
            Value::map(Self::SHAPE, entries)
        })
    }
}

impl<K: Reflect, V: Reflect> Reflect for BTreeMap<K, V> {
    const SHAPE: &'static Shape = &const {
        fn type_name<K: Reflect, V: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "BTreeMap<{}, {}>", K::SHAPE, V::SHAPE)
        }

        Shape::builder::<BTreeMap<K, V>>("BTreeMap")
            .type_name(type_name::<K, V>)
            .def(Def::Map(MapDef {
                k: K::SHAPE,
                v: V::SHAPE,
                set: false,
            }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        cx.shared(Self::SHAPE, self, |cx| {
            let entries = self
                .iter()
                .map(|(k, v)| (k.reflect(cx), v.reflect(cx)))
                .collect();
            Value::map(Self::SHAPE, entries)
        })
    }
}

impl<T: Reflect, S: BuildHasher + 'static> Reflect for HashSet<T, S> {
    const SHAPE: &'static Shape = &const {
        fn type_name<T: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "HashSet<{}>", T::SHAPE)
        }

        Shape::builder::<HashSet<T, S>>("HashSet")
            .type_name(type_name::<T>)
            .def(Def::Map(MapDef {
                k: T::SHAPE,
                v: <() as Reflect>::SHAPE,
                set: true,
            }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        cx.shared(Self::SHAPE, self, |cx| {
            let entries = self
                .iter()
                .map(|k| (k.reflect(cx), ().reflect(cx)))
                .collect();
            Value::map(Self::SHAPE, entries)
        })
    }
}

impl<T: Reflect> Reflect for BTreeSet<T> {
    const SHAPE: &'static Shape = &const {
        fn type_name<T: Reflect>(f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "BTreeSet<{}>", T::SHAPE)
        }

        Shape::builder::<BTreeSet<T>>("BTreeSet")
            .type_name(type_name::<T>)
            .def(Def::Map(MapDef {
                k: T::SHAPE,
                v: <() as Reflect>::SHAPE,
                set: true,
            }))
            .build()
    };

    fn reflect(&self, cx: &mut Reflector) -> Value {
        cx.shared(Self::SHAPE, self, |cx| {
            let entries = self
                .iter()
                .map(|k| (k.reflect(cx), ().reflect(cx)))
                .collect();
            Value::map(Self::SHAPE, entries)
        })
    }
}
